//! Loading a source file into a dataset with provenance.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use insight_model::{Dataset, DatasetSource};

use crate::csv::read_csv_bytes;
use crate::error::{IngestError, Result};
use crate::fingerprint::fingerprint;
use crate::json::parse_json_dataset;
use crate::source::{SourceKind, decode_text, read_source_bytes};
use crate::summary::UploadSummary;

/// A source file read from disk.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub kind: SourceKind,
    pub source: DatasetSource,
    /// `None` for text sources.
    pub dataset: Option<Dataset>,
    pub summary: UploadSummary,
}

/// Reads a CSV, JSON, or text file.
///
/// Structured sources are parsed into a [`Dataset`] carrying provenance whose
/// id is the content fingerprint. Text sources only get a preview.
pub fn load_source(path: &Path) -> Result<LoadedSource> {
    let kind = SourceKind::from_path(path);
    let bytes = read_source_bytes(path)?;
    let source = provenance(path, &bytes)?;
    debug!(path = %path.display(), ?kind, bytes = bytes.len(), "source read");

    let (dataset, summary) = match kind {
        SourceKind::Csv => {
            let dataset = read_csv_bytes(path, bytes)?;
            let summary = UploadSummary::structured(&dataset);
            (Some(dataset.with_source(source.clone())), summary)
        }
        SourceKind::Json => {
            let text = decode_text(path, &bytes)?;
            let dataset = parse_json_dataset(path, text)?;
            let summary = UploadSummary::structured(&dataset);
            (Some(dataset.with_source(source.clone())), summary)
        }
        SourceKind::Text => {
            let text = decode_text(path, &bytes)?;
            (None, UploadSummary::text(text))
        }
    };

    if let Some(dataset) = &dataset {
        info!(
            dataset = %source.title,
            record_count = dataset.len(),
            column_count = dataset.columns().len(),
            "dataset loaded"
        );
    }

    Ok(LoadedSource {
        kind,
        source,
        dataset,
        summary,
    })
}

/// Loads a structured source, failing for text files.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    load_source(path)?
        .dataset
        .ok_or_else(|| IngestError::UnsupportedSource {
            path: path.to_path_buf(),
        })
}

fn provenance(path: &Path, bytes: &[u8]) -> Result<DatasetSource> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;
    let created_at = metadata
        .created()
        .or_else(|_| metadata.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.clone());
    Ok(DatasetSource {
        id: fingerprint(bytes),
        title,
        filename,
        created_at,
    })
}
