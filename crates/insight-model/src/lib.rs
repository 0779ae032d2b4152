//! Data model for the adaptive analytics engine.
//!
//! - **value**: untyped cells with best-effort numeric/string views
//! - **record**: ordered records, datasets, and provenance
//! - **role**: semantic roles and the per-dataset column binding
//! - **filter**: search text and per-role filters
//! - **metrics**: KPI, time, profit, and category aggregation outputs

pub mod error;
pub mod filter;
pub mod metrics;
pub mod record;
pub mod role;
pub mod value;

pub use error::{ModelError, Result};
pub use filter::{ALL_VALUES, FilterState, RoleFilter};
pub use metrics::{CategoryBucket, KpiSet, NO_RATING, ProfitPoint, TimeBucket};
pub use record::{Dataset, DatasetSource, Record};
pub use role::{ColumnBinding, SemanticRole};
pub use value::{Value, format_numeric, parse_f64};
