//! Records and datasets.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::value::Value;

/// An ordered mapping from column name to value.
///
/// Insertion order is preserved; it drives search over "any of its values"
/// and is the column order reported to presentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    cells: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(column, value)` pairs. Later duplicates replace
    /// earlier ones in place.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut record = Self::new();
        for (column, value) in pairs {
            record.insert(column, value);
        }
        record
    }

    /// Sets the value of `column`, appending the column if it is new.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        if let Some(slot) = self.cells.iter_mut().find(|(name, _)| *name == column) {
            slot.1 = value;
        } else {
            self.cells.push((column, value));
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// String form of a column, empty when the column is absent.
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(Value::display).unwrap_or_default()
    }

    /// Numeric form of a column, zero when absent or unparsable.
    pub fn number(&self, column: &str) -> f64 {
        self.get(column).map_or(0.0, Value::as_f64_or_zero)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.cells.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Provenance metadata supplied by the dataset source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSource {
    /// Stable dataset identifier (content fingerprint for local files).
    pub id: String,
    pub title: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

/// An ordered sequence of records plus the column list they share.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<DatasetSource>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            columns,
            records,
            source: None,
        }
    }

    /// Builds a dataset whose column list is taken from the first record.
    ///
    /// Records are assumed to share that column set; it is not verified.
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns = records
            .first()
            .map(|record| record.columns().map(str::to_string).collect())
            .unwrap_or_default();
        Self::new(columns, records)
    }

    #[must_use]
    pub fn with_source(mut self, source: DatasetSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn source(&self) -> Option<&DatasetSource> {
        self.source.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut record = Record::from_pairs([("a", 1.0), ("b", 2.0)]);
        record.insert("a", 5.0);
        let columns: Vec<&str> = record.columns().collect();
        assert_eq!(columns, vec!["a", "b"]);
        assert_eq!(record.number("a"), 5.0);
    }

    #[test]
    fn absent_columns_read_as_defaults() {
        let record = Record::from_pairs([("region", "North")]);
        assert_eq!(record.text("missing"), "");
        assert_eq!(record.number("region"), 0.0);
    }

    #[test]
    fn columns_come_from_first_record() {
        let dataset = Dataset::from_records(vec![
            Record::from_pairs([("date", "2024-01-05"), ("rev", "100")]),
            Record::from_pairs([("date", "2024-01-06"), ("rev", "90")]),
        ]);
        assert_eq!(dataset.columns(), ["date".to_string(), "rev".to_string()]);
        assert_eq!(dataset.len(), 2);
        assert!(Dataset::from_records(Vec::new()).columns().is_empty());
    }
}
