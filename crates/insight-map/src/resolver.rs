//! Column role resolver implementation.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use insight_model::{ColumnBinding, SemanticRole};

use crate::keywords::RoleKeywords;

/// A role bound during resolution, with the evidence for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleMatch {
    pub role: SemanticRole,
    pub column: String,
    /// Position of the column in the input list.
    pub column_index: usize,
    /// Keyword that matched the lowercased column name.
    pub keyword: String,
}

/// Result of a resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub binding: ColumnBinding,
    /// Matches in role order.
    pub matches: Vec<RoleMatch>,
    pub unbound_roles: Vec<SemanticRole>,
    /// Columns not bound to any role, in input order.
    pub unassigned_columns: Vec<String>,
}

impl ResolutionReport {
    pub fn match_for(&self, role: SemanticRole) -> Option<&RoleMatch> {
        self.matches.iter().find(|m| m.role == role)
    }
}

/// Maps raw column names to semantic roles by keyword substring.
///
/// Roles claim columns in [`SemanticRole::ALL`] order. For each role the
/// first column, in input order, whose lowercased name contains any of the
/// role's keywords is bound, unless an earlier role already claimed it.
/// Resolution never fails; unmatched roles stay unbound.
///
/// # Example
///
/// ```
/// use insight_map::ColumnRoleResolver;
/// use insight_model::SemanticRole;
///
/// let resolver = ColumnRoleResolver::default();
/// let columns = vec!["date".to_string(), "rev".to_string(), "exp".to_string()];
/// let binding = resolver.resolve(&columns);
/// assert_eq!(binding.column(SemanticRole::Revenue), Some("rev"));
/// assert_eq!(binding.column(SemanticRole::Expense), Some("exp"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColumnRoleResolver {
    keywords: RoleKeywords,
}

impl ColumnRoleResolver {
    pub fn new(keywords: RoleKeywords) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &RoleKeywords {
        &self.keywords
    }

    pub fn resolve(&self, columns: &[String]) -> ColumnBinding {
        self.resolve_with_report(columns).binding
    }

    pub fn resolve_with_report(&self, columns: &[String]) -> ResolutionReport {
        let lowered: Vec<String> = columns.iter().map(|column| column.to_lowercase()).collect();
        let mut claimed: BTreeSet<&str> = BTreeSet::new();
        let mut binding = ColumnBinding::new();
        let mut matches = Vec::new();

        for role in SemanticRole::ALL {
            for (index, column) in columns.iter().enumerate() {
                if claimed.contains(column.as_str()) {
                    continue;
                }
                let Some(keyword) = self.keywords.matching_keyword(role, &lowered[index]) else {
                    continue;
                };
                debug!(role = %role, column = %column, keyword, "role bound");
                claimed.insert(column.as_str());
                binding.bind(role, column.clone());
                matches.push(RoleMatch {
                    role,
                    column: column.clone(),
                    column_index: index,
                    keyword: keyword.to_string(),
                });
                break;
            }
        }

        let unassigned_columns = columns
            .iter()
            .filter(|column| !claimed.contains(column.as_str()))
            .cloned()
            .collect();

        ResolutionReport {
            unbound_roles: binding.unbound_roles(),
            binding,
            matches,
            unassigned_columns,
        }
    }
}
