//! Candidate keyword tables per role.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use insight_model::SemanticRole;

/// Ordered keyword substrings per role.
///
/// Serialized as a table keyed by role name so a settings file can override
/// individual roles; call [`RoleKeywords::normalized`] after loading so roles
/// left out keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleKeywords {
    table: BTreeMap<SemanticRole, Vec<String>>,
}

impl Default for RoleKeywords {
    fn default() -> Self {
        let mut table = BTreeMap::new();
        for role in SemanticRole::ALL {
            let keywords = default_keywords(role)
                .iter()
                .map(|keyword| (*keyword).to_string())
                .collect();
            table.insert(role, keywords);
        }
        Self { table }
    }
}

impl RoleKeywords {
    /// Keywords for a role in declared order. Empty if the role was cleared.
    pub fn keywords(&self, role: SemanticRole) -> &[String] {
        self.table.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the keyword list of one role. Keywords are stored lowercased.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, role: SemanticRole, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        self.table.insert(role, list);
        self
    }

    /// Fills roles missing from a partially deserialized table with defaults
    /// and lowercases every keyword.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut merged = Self::default();
        for (role, keywords) in self.table {
            merged = merged.with_keywords(role, keywords);
        }
        merged
    }

    /// First keyword of `role` contained in an already-lowercased column name.
    pub fn matching_keyword(&self, role: SemanticRole, lowered_column: &str) -> Option<&str> {
        self.keywords(role)
            .iter()
            .find(|keyword| lowered_column.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

/// Built-in keyword list for a role.
pub fn default_keywords(role: SemanticRole) -> &'static [&'static str] {
    // `rev` and `exp` also match names such as `review_score` or `export`.
    // Matching stays substring-based; an override list narrows it.
    match role {
        SemanticRole::Revenue => &["revenue", "sales", "amount", "price", "rev"],
        SemanticRole::Profit => &["profit", "margin", "net"],
        SemanticRole::Expense => &["expense", "cost", "spend", "exp"],
        SemanticRole::Units => &["units", "unit", "quantity", "qty", "volume"],
        SemanticRole::Date => &["date", "time", "period", "month", "day"],
        SemanticRole::Department => &["department", "dept", "category", "segment", "team"],
        SemanticRole::Region => &["region", "country", "territory", "location", "city", "state"],
        SemanticRole::Rating => &["rating", "score", "satisfaction", "grade"],
    }
}
