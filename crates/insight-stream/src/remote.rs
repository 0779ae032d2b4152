//! Payloads of the remote pre-aggregation service.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use insight_map::apply_column_hints;
use insight_model::{ColumnBinding, ModelError, SemanticRole, TimeBucket};

/// Bucket width requested from the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Frequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(ModelError::InvalidOption {
                name: "frequency",
                reason: format!("'{s}' is not one of Weekly, Monthly, Yearly"),
            }),
        }
    }
}

/// One period of remote `chart_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePeriod {
    #[serde(alias = "name", alias = "period", alias = "label")]
    pub date: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default, alias = "expense")]
    pub expenses: f64,
}

impl From<RemotePeriod> for TimeBucket {
    fn from(period: RemotePeriod) -> Self {
        Self {
            period_label: period.date,
            revenue: period.revenue,
            expenses: period.expenses,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    #[serde(other)]
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub metric: String,
    pub narrative: String,
    #[serde(default)]
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSynthesis {
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub insights: Vec<Insight>,
}

/// Response of `GET /analytics/{dataset_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteAggregation {
    /// Service-computed headline metrics, passed through untouched.
    #[serde(default)]
    pub metrics: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub chart_data: Vec<RemotePeriod>,
    /// Role name to column name; `null` means the service found no column.
    #[serde(default)]
    pub column_mapping: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub ai_synthesis: Option<AiSynthesis>,
}

impl RemoteAggregation {
    pub fn time_buckets(&self) -> Vec<TimeBucket> {
        self.chart_data.iter().cloned().map(TimeBucket::from).collect()
    }

    /// Non-null mapping entries.
    pub fn hints(&self) -> impl Iterator<Item = (&str, &str)> {
        self.column_mapping
            .iter()
            .filter_map(|(role, column)| column.as_deref().map(|column| (role.as_str(), column)))
    }

    /// Merges the mapping into `binding`, returning the roles that changed.
    pub fn apply_hints(&self, binding: &mut ColumnBinding, columns: &[String]) -> Vec<SemanticRole> {
        apply_column_hints(binding, self.hints(), columns)
    }
}
