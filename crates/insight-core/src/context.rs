use insight_model::{ColumnBinding, SemanticRole};

use crate::options::AnalyticsOptions;

/// Everything an aggregation needs besides the records themselves.
///
/// The column list is the dataset's declared columns; it backs the positional
/// fallback of categorical roles.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsContext<'a> {
    pub binding: &'a ColumnBinding,
    pub columns: &'a [String],
    pub options: AnalyticsOptions,
}

impl<'a> AnalyticsContext<'a> {
    pub fn new(binding: &'a ColumnBinding, columns: &'a [String]) -> Self {
        Self {
            binding,
            columns,
            options: AnalyticsOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: AnalyticsOptions) -> Self {
        self.options = options;
        self
    }

    pub fn column(&self, role: SemanticRole) -> Option<&'a str> {
        self.binding.column(role)
    }

    /// Bound column of a role, or its positional fallback.
    pub fn grouping_column(&self, role: SemanticRole) -> Option<&'a str> {
        self.binding.column_or_fallback(role, self.columns)
    }
}
