//! Merging externally supplied role hints into a resolved binding.
//!
//! A pre-aggregation service may report its own `column_mapping`. Hints win
//! over keyword resolution when they name a column the dataset really has.

use std::collections::HashMap;

use tracing::debug;

use insight_model::{ColumnBinding, SemanticRole};

/// Applies `(role name, column name)` hints to `binding`.
///
/// Role names parse leniently (`"expenses"`, `"dept"`). Column names match
/// exactly first, then case-insensitively; the dataset's spelling is bound.
/// Hints with an unknown role, a blank column, or a column not present in
/// `columns` are skipped. Returns the roles whose binding changed.
pub fn apply_column_hints<I, K, V>(
    binding: &mut ColumnBinding,
    hints: I,
    columns: &[String],
) -> Vec<SemanticRole>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut by_upper: HashMap<String, &str> = HashMap::new();
    for column in columns {
        by_upper
            .entry(column.to_uppercase())
            .or_insert(column.as_str());
    }

    let mut changed = Vec::new();
    for (role_name, column_name) in hints {
        let role_name = role_name.as_ref();
        let column_name = column_name.as_ref().trim();
        let Ok(role) = role_name.parse::<SemanticRole>() else {
            debug!(hint = role_name, "ignoring hint for unknown role");
            continue;
        };
        if column_name.is_empty() {
            continue;
        }
        let resolved = columns
            .iter()
            .find(|column| column.as_str() == column_name)
            .map(String::as_str)
            .or_else(|| by_upper.get(&column_name.to_uppercase()).copied());
        let Some(column) = resolved else {
            debug!(role = %role, column = column_name, "ignoring hint for absent column");
            continue;
        };
        if binding.column(role) == Some(column) {
            continue;
        }
        if let Some(previous) = binding.role_of(column) {
            changed.push(previous);
        }
        binding.bind(role, column);
        changed.push(role);
    }
    changed.sort();
    changed.dedup();
    changed
}
