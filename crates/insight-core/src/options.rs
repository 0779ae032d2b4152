use serde::{Deserialize, Serialize};

use insight_model::{ModelError, Result};

/// What happens to the current page when the filtered set changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagePolicy {
    /// Clamp the page into `[1, max(total_pages, 1)]`.
    #[default]
    Clamp,
    /// Keep the requested page; out-of-range pages are empty.
    Preserve,
}

/// Emission order of time buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketOrder {
    /// Order in which each period key first appears.
    #[default]
    FirstSeen,
    /// Ascending parsed date; keys that do not parse follow in first-seen order.
    Chronological,
}

/// How `topRating` is chosen among equally frequent ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTieBreak {
    #[default]
    FirstEncountered,
    Lexicographic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsOptions {
    pub page_size: usize,
    /// Number of trailing time buckets kept.
    pub series_limit: usize,
    /// Number of leading records in the profit trend.
    pub trend_length: usize,
    /// Entries kept by ranked breakdowns.
    pub top_n: usize,
    pub page_policy: PagePolicy,
    pub bucket_order: BucketOrder,
    pub rating_tie_break: RatingTieBreak,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            page_size: 8,
            series_limit: 10,
            trend_length: 20,
            top_n: 5,
            page_policy: PagePolicy::default(),
            bucket_order: BucketOrder::default(),
            rating_tie_break: RatingTieBreak::default(),
        }
    }
}

impl AnalyticsOptions {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("page_size", self.page_size),
            ("series_limit", self.series_limit),
            ("top_n", self.top_n),
        ] {
            if value == 0 {
                return Err(ModelError::InvalidOption {
                    name,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_page_policy(mut self, policy: PagePolicy) -> Self {
        self.page_policy = policy;
        self
    }

    #[must_use]
    pub fn with_bucket_order(mut self, order: BucketOrder) -> Self {
        self.bucket_order = order;
        self
    }

    #[must_use]
    pub fn with_rating_tie_break(mut self, tie_break: RatingTieBreak) -> Self {
        self.rating_tie_break = tie_break;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AnalyticsOptions::default().validate().is_ok());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = AnalyticsOptions::default()
            .with_page_size(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }
}
