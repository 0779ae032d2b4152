//! Integration tests for loading sources from disk.

use std::fs;

use insight_ingest::{
    IngestError, SourceKind, UploadSummary, fingerprint, load_dataset, load_source,
};
use insight_model::Value;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

#[test]
fn csv_source_carries_fingerprint_provenance() {
    let dir = TempDir::new().expect("temp dir");
    let content = "date,rev,exp\n2024-01-05,100,40\n2024-01-05,50,10\n2024-02-01,200,80\n";
    let path = write(&dir, "ledger.csv", content);

    let loaded = load_source(&path).expect("load csv");
    assert_eq!(loaded.kind, SourceKind::Csv);
    assert_eq!(loaded.source.title, "ledger");
    assert_eq!(loaded.source.filename, "ledger.csv");
    assert_eq!(loaded.source.id, fingerprint(content.as_bytes()));

    let dataset = loaded.dataset.expect("structured dataset");
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.records()[2].get("rev"), Some(&Value::Number(200.0)));
    assert_eq!(dataset.source().map(|s| s.id.as_str()), Some(loaded.source.id.as_str()));

    match loaded.summary {
        UploadSummary::Structured { columns, rows, preview } => {
            assert_eq!(columns, vec!["date", "rev", "exp"]);
            assert_eq!(rows, 3);
            assert_eq!(preview.len(), 3);
        }
        UploadSummary::Text { .. } => panic!("expected structured summary"),
    }
}

#[test]
fn json_source_loads_records() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "orders.json",
        r#"[{"Region": "North", "Sales": 12.5}, {"Region": "South", "Sales": "7"}]"#,
    );
    let dataset = load_dataset(&path).expect("load json");
    assert_eq!(dataset.columns(), ["Region", "Sales"]);
    assert_eq!(dataset.records()[1].number("Sales"), 7.0);
}

#[test]
fn text_source_only_previews() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "notes.md", &"x".repeat(500));

    let loaded = load_source(&path).expect("load text");
    assert!(loaded.dataset.is_none());
    let json = serde_json::to_value(&loaded.summary).expect("serialize summary");
    assert_eq!(json["type"], "text");
    assert_eq!(json["preview"].as_str().map(str::len), Some(200));

    assert!(matches!(
        load_dataset(&path),
        Err(IngestError::UnsupportedSource { .. })
    ));
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().expect("temp dir");
    let err = load_source(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
