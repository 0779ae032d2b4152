//! Analytics over datasets whose columns have been bound to semantic roles.
//!
//! All functions here are pure: they read a filtered record set together
//! with a [`insight_model::ColumnBinding`] and never fail. Missing bindings
//! and malformed cells contribute zero or fall back to positional columns.

pub mod breakdown;
pub mod context;
pub mod filter;
pub mod kpi;
pub mod options;
pub mod paginate;
pub mod projection;
pub mod series;
pub mod session;

pub use breakdown::{
    CategoryMeasure, UNKNOWN_CATEGORY, category_breakdown, department_counts, department_profit,
    filter_options, ranked_breakdown,
};
pub use context::AnalyticsContext;
pub use filter::{filter_dataset, filter_records, matches_role_filters, matches_search};
pub use kpi::{compute_kpis, sum_role, top_rating};
pub use options::{AnalyticsOptions, BucketOrder, PagePolicy, RatingTieBreak};
pub use paginate::{Page, clamp_page, page_range, paginate, total_pages};
pub use projection::{
    ChartPoint, ChartSeries, DashboardReport, KpiCard, LedgerTable, PageSummary, category_chart,
    format_amount, kpi_cards, profit_chart, time_series_charts,
};
pub use series::{parse_period, period_key, profit_trend, time_series};
pub use session::{DashboardSession, FILTER_ROLES};
