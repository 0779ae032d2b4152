//! JSON record arrays.

use std::path::Path;

use serde_json::Value as JsonValue;

use insight_model::{Dataset, Record, Value};

use crate::error::{IngestError, Result};

/// Parses a JSON array of objects.
///
/// Object keys keep their document order. The column list is the union of
/// keys in order of first appearance.
pub fn parse_json_dataset(path: &Path, text: &str) -> Result<Dataset> {
    let parsed: JsonValue = serde_json::from_str(text).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    let JsonValue::Array(items) = parsed else {
        return Err(IngestError::JsonShape {
            path: path.to_path_buf(),
            reason: "expected a top-level array of records".to_string(),
        });
    };

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let JsonValue::Object(fields) = item else {
            return Err(IngestError::JsonShape {
                path: path.to_path_buf(),
                reason: format!("element {index} is not an object"),
            });
        };
        let mut record = Record::new();
        for (key, value) in fields {
            if !columns.contains(&key) {
                columns.push(key.clone());
            }
            record.insert(key, json_to_value(value));
        }
        records.push(record);
    }
    Ok(Dataset::new(columns, records))
}

fn json_to_value(value: JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Missing,
        JsonValue::Number(n) => n.as_f64().map_or(Value::Missing, Value::Number),
        JsonValue::String(s) => Value::from_text(&s),
        JsonValue::Bool(b) => Value::Text(b.to_string()),
        nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => Value::Text(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_key_order() {
        let dataset = parse_json_dataset(
            Path::new("x.json"),
            r#"[{"zeta": 1, "alpha": "a"}, {"zeta": 2, "alpha": null, "extra": true}]"#,
        )
        .unwrap();
        assert_eq!(dataset.columns(), ["zeta", "alpha", "extra"]);
        assert_eq!(dataset.records()[1].get("alpha"), Some(&Value::Missing));
        assert_eq!(dataset.records()[1].text("extra"), "true");
    }

    #[test]
    fn rejects_non_array() {
        let err = parse_json_dataset(Path::new("x.json"), r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, IngestError::JsonShape { .. }));
        let err = parse_json_dataset(Path::new("x.json"), "[1, 2]").unwrap_err();
        assert!(err.to_string().contains("element 0"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_json_dataset(Path::new("x.json"), "[{").unwrap_err();
        assert!(matches!(err, IngestError::JsonParse { .. }));
    }
}
