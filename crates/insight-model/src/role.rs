//! Semantic roles and the resolved column binding.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A business meaning that a raw column may or may not represent.
///
/// Declaration order is significant: the resolver lets roles claim columns in
/// this order, and a `BTreeMap` keyed by role iterates in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticRole {
    Revenue,
    Profit,
    Expense,
    Units,
    Date,
    Department,
    Region,
    Rating,
}

impl SemanticRole {
    pub const ALL: [SemanticRole; 8] = [
        Self::Revenue,
        Self::Profit,
        Self::Expense,
        Self::Units,
        Self::Date,
        Self::Department,
        Self::Region,
        Self::Rating,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Profit => "Profit",
            Self::Expense => "Expense",
            Self::Units => "Units",
            Self::Date => "Date",
            Self::Department => "Department",
            Self::Region => "Region",
            Self::Rating => "Rating",
        }
    }

    /// Roles whose bound column is summed into a KPI.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Revenue | Self::Profit | Self::Expense | Self::Units
        )
    }

    /// Position of the column used when a categorical role is unbound.
    ///
    /// Department falls back to the first column, Region to the second.
    #[must_use]
    pub const fn fallback_position(self) -> Option<usize> {
        match self {
            Self::Department => Some(0),
            Self::Region => Some(1),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SemanticRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "revenue" | "sales" => Ok(Self::Revenue),
            "profit" => Ok(Self::Profit),
            "expense" | "expenses" | "cost" => Ok(Self::Expense),
            "units" | "unit" | "quantity" => Ok(Self::Units),
            "date" => Ok(Self::Date),
            "department" | "dept" => Ok(Self::Department),
            "region" => Ok(Self::Region),
            "rating" => Ok(Self::Rating),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}

/// Resolved mapping from role to column name for one dataset.
///
/// A column is bound to at most one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBinding {
    columns: BTreeMap<SemanticRole, String>,
}

impl ColumnBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `column` to `role`, releasing it from any other role first.
    pub fn bind(&mut self, role: SemanticRole, column: impl Into<String>) {
        let column = column.into();
        self.columns.retain(|other, bound| *other == role || *bound != column);
        self.columns.insert(role, column);
    }

    pub fn unbind(&mut self, role: SemanticRole) -> Option<String> {
        self.columns.remove(&role)
    }

    pub fn column(&self, role: SemanticRole) -> Option<&str> {
        self.columns.get(&role).map(String::as_str)
    }

    pub fn is_bound(&self, role: SemanticRole) -> bool {
        self.columns.contains_key(&role)
    }

    /// The role a column is bound to, if any.
    pub fn role_of(&self, column: &str) -> Option<SemanticRole> {
        self.columns
            .iter()
            .find(|(_, bound)| bound.as_str() == column)
            .map(|(role, _)| *role)
    }

    /// Bound column for a categorical role, else its positional fallback.
    ///
    /// The fallback is the column at [`SemanticRole::fallback_position`], or the
    /// last column when the dataset is narrower than that. Roles without a
    /// fallback position yield `None` when unbound.
    pub fn column_or_fallback<'a>(
        &'a self,
        role: SemanticRole,
        columns: &'a [String],
    ) -> Option<&'a str> {
        if let Some(column) = self.column(role) {
            return Some(column);
        }
        let position = role.fallback_position()?;
        columns
            .get(position)
            .or_else(|| columns.last())
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SemanticRole, &str)> {
        self.columns.iter().map(|(role, column)| (*role, column.as_str()))
    }

    /// Roles that no column represents.
    pub fn unbound_roles(&self) -> Vec<SemanticRole> {
        SemanticRole::ALL
            .into_iter()
            .filter(|role| !self.is_bound(*role))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
