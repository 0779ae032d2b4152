//! Scalar cell values.
//!
//! Source datasets carry untyped cells. A [`Value`] keeps whatever the source
//! supplied and offers best-effort numeric and string views over it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    /// Builds a value from raw source text.
    ///
    /// Blank text becomes [`Value::Missing`]. Everything else stays text; numeric
    /// interpretation happens lazily through [`Value::as_f64`].
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Missing
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    /// Best-effort numeric view. `None` for missing or unparsable cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            Self::Number(_) | Self::Missing => None,
            Self::Text(s) => parse_f64(s),
        }
    }

    /// Numeric view where anything unparsable counts as zero.
    pub fn as_f64_or_zero(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }

    /// String form used for search, equality filters, and grouping.
    pub fn display(&self) -> String {
        match self {
            Self::Number(v) => format_numeric(*v),
            Self::Text(s) => s.clone(),
            Self::Missing => String::new(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parses a string as f64, returning None for invalid or empty strings.
///
/// Thousands separators are stripped before parsing so that `"1,200"` reads as
/// 1200. Non-finite results (`"inf"`, `"NaN"`) are rejected.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = if trimmed.contains(',') {
        trimmed.replace(',', "").parse::<f64>().ok()
    } else {
        trimmed.parse::<f64>().ok()
    };
    parsed.filter(|v| v.is_finite())
}

/// Formats a floating-point number without a trailing fractional zero run.
///
/// `100.0` renders as `"100"`, `1.50` as `"1.5"`.
pub fn format_numeric(value: f64) -> String {
    let s = format!("{value}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
