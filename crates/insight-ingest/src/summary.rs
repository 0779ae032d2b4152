//! Upload summaries: a quick look at a source before it becomes a dataset.

use serde::Serialize;

use insight_model::{Dataset, Record};

/// Rows included in a structured preview.
pub const PREVIEW_ROWS: usize = 5;

/// Characters included in a text preview.
pub const TEXT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UploadSummary {
    Structured {
        columns: Vec<String>,
        rows: usize,
        preview: Vec<Record>,
    },
    Text {
        preview: String,
    },
}

impl UploadSummary {
    pub fn structured(dataset: &Dataset) -> Self {
        Self::Structured {
            columns: dataset.columns().to_vec(),
            rows: dataset.len(),
            preview: dataset.iter().take(PREVIEW_ROWS).cloned().collect(),
        }
    }

    pub fn text(content: &str) -> Self {
        Self::Text {
            preview: text_preview(content),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured { .. })
    }
}

/// First [`TEXT_PREVIEW_CHARS`] characters of `content`.
pub fn text_preview(content: &str) -> String {
    content.chars().take(TEXT_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_counts_characters_not_bytes() {
        let content = "é".repeat(300);
        assert_eq!(text_preview(&content).chars().count(), TEXT_PREVIEW_CHARS);
        assert_eq!(text_preview("short"), "short");
    }

    #[test]
    fn structured_preview_is_capped() {
        let records = (0..8).map(|i| Record::from_pairs([("n", i as f64)])).collect();
        let summary = UploadSummary::structured(&Dataset::from_records(records));
        let UploadSummary::Structured { rows, preview, .. } = summary else {
            panic!("expected structured summary");
        };
        assert_eq!(rows, 8);
        assert_eq!(preview.len(), PREVIEW_ROWS);
    }
}
