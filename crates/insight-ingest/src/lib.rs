//! Dataset ingestion.
//!
//! # Features
//!
//! - **CSV Loading**: single-header CSV files through Polars with type inference
//! - **JSON Loading**: arrays of objects with key order preserved
//! - **Text Preview**: first characters of any other file
//! - **Upload Summary**: columns, row count, and a short preview
//! - **Fingerprint**: SHA-256 of the source bytes, used as the dataset id
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use insight_ingest::load_dataset;
//!
//! let dataset = load_dataset(Path::new("data/sales.csv"))?;
//! println!("{} records", dataset.len());
//! ```

mod csv;
mod error;
mod fingerprint;
mod json;
mod loader;
mod source;
mod summary;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use csv::{any_to_value, frame_to_dataset, read_csv_bytes, read_csv_dataset, read_csv_frame};
pub use json::parse_json_dataset;
pub use source::{MAX_SOURCE_SIZE, SourceKind, check_file_size_with_limit, read_source_bytes};

// === Loading ===
pub use fingerprint::fingerprint;
pub use loader::{LoadedSource, load_dataset, load_source};
pub use summary::{PREVIEW_ROWS, TEXT_PREVIEW_CHARS, UploadSummary, text_preview};
