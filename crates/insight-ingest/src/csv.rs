//! CSV loading through Polars.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;
use tracing::warn;

use insight_model::{Dataset, Record, Value};

use crate::error::{IngestError, Result};

/// Number of rows Polars inspects to infer column types.
const INFER_SCHEMA_ROWS: usize = 100;

/// Reads a CSV file with a single header row into a DataFrame.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    csv_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| csv_error(path, &e))?
        .finish()
        .map_err(|e| csv_error(path, &e))
}

/// Parses CSV content already read from `path`. The path only labels errors.
pub fn read_csv_bytes(path: &Path, bytes: Vec<u8>) -> Result<Dataset> {
    let df = csv_options()
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| csv_error(path, &e))?;
    frame_to_dataset(&df)
}

fn csv_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
}

fn csv_error(path: &Path, error: &PolarsError) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// Converts a DataFrame into records, keeping column and row order.
pub fn frame_to_dataset(df: &DataFrame) -> Result<Dataset> {
    if df.width() > 500 {
        warn!(
            columns = df.width(),
            "dataset has more than 500 columns, may impact performance"
        );
    }
    let columns: Vec<String> = df
        .get_columns()
        .iter()
        .map(|col| col.name().to_string())
        .collect();

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut record = Record::new();
        for (name, col) in columns.iter().zip(df.get_columns()) {
            record.insert(name.as_str(), any_to_value(col.get(row)?));
        }
        records.push(record);
    }
    Ok(Dataset::new(columns, records))
}

/// Reads a CSV file straight into a [`Dataset`].
pub fn read_csv_dataset(path: &Path) -> Result<Dataset> {
    let df = read_csv_frame(path)?;
    frame_to_dataset(&df)
}

/// Converts a Polars cell into a model value.
///
/// Integers and floats become numbers, nulls become missing, and everything
/// else keeps its string form.
pub fn any_to_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Missing,
        AnyValue::Int8(v) => Value::Number(f64::from(v)),
        AnyValue::Int16(v) => Value::Number(f64::from(v)),
        AnyValue::Int32(v) => Value::Number(f64::from(v)),
        AnyValue::Int64(v) => Value::Number(v as f64),
        AnyValue::UInt8(v) => Value::Number(f64::from(v)),
        AnyValue::UInt16(v) => Value::Number(f64::from(v)),
        AnyValue::UInt32(v) => Value::Number(f64::from(v)),
        AnyValue::UInt64(v) => Value::Number(v as f64),
        AnyValue::Float32(v) => Value::Number(f64::from(v)),
        AnyValue::Float64(v) => Value::Number(v),
        AnyValue::String(s) => Value::from_text(s),
        AnyValue::StringOwned(s) => Value::from_text(&s),
        AnyValue::Boolean(b) => Value::Text(b.to_string()),
        other => {
            let s = other.to_string();
            Value::from_text(s.trim_matches('"'))
        }
    }
}
