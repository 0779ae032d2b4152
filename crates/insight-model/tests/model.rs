//! Tests for insight-model types.

use insight_model::{
    ColumnBinding, Dataset, FilterState, KpiSet, Record, RoleFilter, SemanticRole, TimeBucket,
    Value,
};

#[test]
fn record_serializes_in_column_order() {
    let record = Record::from_pairs([
        ("zeta", Value::from("z")),
        ("alpha", Value::Number(2.0)),
        ("mid", Value::Missing),
    ]);
    let json = serde_json::to_string(&record).expect("serialize record");
    assert_eq!(json, r#"{"zeta":"z","alpha":2.0,"mid":null}"#);
}

#[test]
fn kpis_serialize_camel_case() {
    let json = serde_json::to_value(KpiSet::default()).expect("serialize kpis");
    assert_eq!(json["totalRevenue"], 0.0);
    assert_eq!(json["topRating"], "N/A");
}

#[test]
fn time_bucket_label_field() {
    let bucket = TimeBucket::new("2024-01-05");
    let json = serde_json::to_value(&bucket).expect("serialize bucket");
    assert_eq!(json["periodLabel"], "2024-01-05");
}

#[test]
fn filter_state_round_trips_all_sentinel() {
    let state = FilterState::new()
        .with_search("north")
        .with_role_filter(SemanticRole::Department, "Sales");
    let json = serde_json::to_string(&state).expect("serialize filters");
    assert_eq!(
        json,
        r#"{"searchText":"north","roleFilters":{"department":"Sales"}}"#
    );
    let parsed: FilterState =
        serde_json::from_str(r#"{"searchText":"","roleFilters":{"region":"All"}}"#)
            .expect("deserialize filters");
    assert_eq!(parsed.filter_for(SemanticRole::Region), &RoleFilter::All);
    assert!(parsed.is_default());
}

#[test]
fn binding_lists_unbound_roles() {
    let mut binding = ColumnBinding::new();
    binding.bind(SemanticRole::Revenue, "rev");
    binding.bind(SemanticRole::Date, "date");
    let unbound = binding.unbound_roles();
    assert_eq!(unbound.len(), 6);
    assert!(!unbound.contains(&SemanticRole::Revenue));
    assert_eq!(binding.role_of("date"), Some(SemanticRole::Date));
}

#[test]
fn dataset_iterates_in_insertion_order() {
    let dataset = Dataset::from_records(vec![
        Record::from_pairs([("id", 3.0)]),
        Record::from_pairs([("id", 1.0)]),
        Record::from_pairs([("id", 2.0)]),
    ]);
    let ids: Vec<f64> = dataset.iter().map(|record| record.number("id")).collect();
    assert_eq!(ids, vec![3.0, 1.0, 2.0]);
}
