use std::fs;

use insight_cli::config::Settings;
use insight_cli::filters::filter_state;
use insight_cli::logging::{REDACTED_VALUE, redact_value};
use insight_core::{BucketOrder, RatingTieBreak};
use insight_model::{RoleFilter, SemanticRole};
use tempfile::tempdir;

#[test]
fn explicit_settings_file_is_loaded() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        r#"
[analytics]
series_limit = 12
bucket_order = "chronological"
rating_tie_break = "lexicographic"

[keywords]
revenue = ["Turnover", "sales"]

[remote]
endpoint = "http://127.0.0.1:9000"
timeout_secs = 5
user_id = "analyst"
"#,
    )
    .expect("write settings");

    let settings = Settings::load(Some(&path)).expect("load");
    assert_eq!(settings.analytics.series_limit, 12);
    assert_eq!(settings.analytics.bucket_order, BucketOrder::Chronological);
    assert_eq!(
        settings.analytics.rating_tie_break,
        RatingTieBreak::Lexicographic
    );
    assert_eq!(
        settings.keywords.keywords(SemanticRole::Revenue),
        ["turnover", "sales"]
    );
    assert!(!settings.keywords.keywords(SemanticRole::Date).is_empty());
    assert_eq!(settings.remote.user_id, "analyst");
    assert_eq!(settings.remote.timeout().as_secs(), 5);
}

#[test]
fn broken_explicit_settings_are_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[analytics\npage_size = ").expect("write settings");
    assert!(Settings::load(Some(&path)).is_err());
}

#[test]
fn missing_explicit_settings_are_an_error() {
    let dir = tempdir().expect("tempdir");
    assert!(Settings::load(Some(&dir.path().join("absent.toml"))).is_err());
}

#[test]
fn repeated_filters_keep_the_last_value() {
    let state = filter_state(
        Some("north"),
        ["region=East", "department=Ops", "region=West"],
    )
    .expect("valid filters");
    assert_eq!(state.search_text, "north");
    assert_eq!(
        state.filter_for(SemanticRole::Region),
        &RoleFilter::Only("West".to_string())
    );
    assert_eq!(
        state.filter_for(SemanticRole::Department),
        &RoleFilter::Only("Ops".to_string())
    );
}

#[test]
fn all_filter_clears_the_role() {
    let state = filter_state(None, ["region=East", "region=All"]).expect("valid filters");
    assert!(state.is_default());
}

#[test]
fn values_are_redacted_without_log_data() {
    assert_eq!(redact_value("ACME Corp"), REDACTED_VALUE);
}
