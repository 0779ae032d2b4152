//! Aggregation outputs.
//!
//! These are recomputed on every filter or dataset change and never persisted.
//! Field names serialize in camelCase because presentation consumes them as-is.

use serde::{Deserialize, Serialize};

/// Placeholder rating when no rating column is bound or no value is present.
pub const NO_RATING: &str = "N/A";

/// Headline KPI totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSet {
    pub total_revenue: f64,
    pub total_profit: f64,
    pub total_expenses: f64,
    pub total_units: f64,
    pub top_rating: String,
}

impl Default for KpiSet {
    fn default() -> Self {
        Self {
            total_revenue: 0.0,
            total_profit: 0.0,
            total_expenses: 0.0,
            total_units: 0.0,
            top_rating: NO_RATING.to_string(),
        }
    }
}

/// Revenue and expenses accumulated for one period label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    pub period_label: String,
    pub revenue: f64,
    pub expenses: f64,
}

impl TimeBucket {
    pub fn new(period_label: impl Into<String>) -> Self {
        Self {
            period_label: period_label.into(),
            revenue: 0.0,
            expenses: 0.0,
        }
    }
}

/// One point of the positional profit trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitPoint {
    /// 1-based position in display order.
    pub sequence_index: usize,
    pub profit: f64,
}

/// One group of a categorical breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub name: String,
    pub value: f64,
}

impl CategoryBucket {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
