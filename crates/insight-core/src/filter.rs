//! Filter pipeline: free-text search, then per-role exact matches.
//!
//! Filtering only removes records; surviving records keep their order.

use std::borrow::Borrow;

use insight_model::{ColumnBinding, Dataset, FilterState, Record};

/// True when the lowercased string form of any value contains `needle`.
///
/// `needle` must already be lowercased. An empty needle matches everything.
pub fn matches_search(record: &Record, needle: &str) -> bool {
    needle.is_empty()
        || record
            .values()
            .any(|value| value.display().to_lowercase().contains(needle))
}

/// True when every active role filter with a bound column matches exactly.
///
/// Filters on unbound roles are ignored.
pub fn matches_role_filters(record: &Record, binding: &ColumnBinding, state: &FilterState) -> bool {
    state.active_role_filters().all(|(role, expected)| {
        binding
            .column(role)
            .is_none_or(|column| record.text(column) == expected)
    })
}

/// Applies search and role filters, returning references in original order.
pub fn filter_records<'a, R>(
    records: &'a [R],
    binding: &ColumnBinding,
    state: &FilterState,
) -> Vec<&'a Record>
where
    R: Borrow<Record>,
{
    let needle = state.search_text.to_lowercase();
    records
        .iter()
        .map(<R as Borrow<Record>>::borrow)
        .filter(|record| matches_search(record, &needle))
        .filter(|record| matches_role_filters(record, binding, state))
        .collect()
}

/// Owned variant of [`filter_records`] that keeps the dataset's columns and
/// provenance.
pub fn filter_dataset(dataset: &Dataset, binding: &ColumnBinding, state: &FilterState) -> Dataset {
    let records = filter_records(dataset.records(), binding, state)
        .into_iter()
        .cloned()
        .collect();
    let filtered = Dataset::new(dataset.columns().to_vec(), records);
    match dataset.source() {
        Some(source) => filtered.with_source(source.clone()),
        None => filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_model::SemanticRole;

    fn sample() -> Vec<Record> {
        vec![
            Record::from_pairs([("dept", "Sales"), ("city", "North Bay")]),
            Record::from_pairs([("dept", "Ops"), ("city", "Northfield")]),
            Record::from_pairs([("dept", "Sales"), ("city", "Southport")]),
        ]
    }

    fn binding() -> ColumnBinding {
        let mut binding = ColumnBinding::new();
        binding.bind(SemanticRole::Department, "dept");
        binding.bind(SemanticRole::Region, "city");
        binding
    }

    #[test]
    fn search_is_case_insensitive_over_any_value() {
        let records = sample();
        let state = FilterState::new().with_search("NORTH");
        let kept = filter_records(&records, &binding(), &state);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].text("city"), "North Bay");
    }

    #[test]
    fn role_filter_is_exact_and_case_sensitive() {
        let records = sample();
        let state = FilterState::new().with_role_filter(SemanticRole::Department, "sales");
        assert!(filter_records(&records, &binding(), &state).is_empty());

        let state = FilterState::new().with_role_filter(SemanticRole::Department, "Sales");
        assert_eq!(filter_records(&records, &binding(), &state).len(), 2);
    }

    #[test]
    fn unbound_role_filter_is_ignored() {
        let records = sample();
        let state = FilterState::new().with_role_filter(SemanticRole::Rating, "5");
        assert_eq!(filter_records(&records, &binding(), &state).len(), 3);
    }

    #[test]
    fn numbers_are_searchable_by_display_form() {
        let records = vec![Record::from_pairs([("rev", 100.0)])];
        let state = FilterState::new().with_search("100");
        assert_eq!(filter_records(&records, &ColumnBinding::new(), &state).len(), 1);
    }
}
