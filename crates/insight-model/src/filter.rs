//! User-controlled filter state.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::role::SemanticRole;

/// Sentinel accepted by selectors to mean "no restriction".
pub const ALL_VALUES: &str = "All";

/// Per-role filter: either the `"All"` sentinel or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleFilter {
    #[default]
    All,
    Only(String),
}

impl RoleFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl From<String> for RoleFilter {
    fn from(value: String) -> Self {
        if value == ALL_VALUES {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<&str> for RoleFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<RoleFilter> for String {
    fn from(filter: RoleFilter) -> Self {
        match filter {
            RoleFilter::All => ALL_VALUES.to_string(),
            RoleFilter::Only(value) => value,
        }
    }
}

impl fmt::Display for RoleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value().unwrap_or(ALL_VALUES))
    }
}

/// Free-text search plus per-role exact-match filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search_text: String,
    pub role_filters: BTreeMap<SemanticRole, RoleFilter>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    #[must_use]
    pub fn with_role_filter(mut self, role: SemanticRole, filter: impl Into<RoleFilter>) -> Self {
        self.set_role_filter(role, filter);
        self
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Sets a role filter; setting `"All"` removes the entry.
    pub fn set_role_filter(&mut self, role: SemanticRole, filter: impl Into<RoleFilter>) {
        match filter.into() {
            RoleFilter::All => {
                self.role_filters.remove(&role);
            }
            only => {
                self.role_filters.insert(role, only);
            }
        }
    }

    pub fn filter_for(&self, role: SemanticRole) -> &RoleFilter {
        static ALL: RoleFilter = RoleFilter::All;
        self.role_filters.get(&role).unwrap_or(&ALL)
    }

    /// Role filters that actually restrict, in role order.
    pub fn active_role_filters(&self) -> impl Iterator<Item = (SemanticRole, &str)> {
        self.role_filters
            .iter()
            .filter_map(|(role, filter)| filter.value().map(|value| (*role, value)))
    }

    pub fn is_default(&self) -> bool {
        self.search_text.is_empty() && self.active_role_filters().next().is_none()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
