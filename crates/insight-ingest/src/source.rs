//! Source classification and raw byte access.

use std::path::Path;

use serde::Serialize;

use crate::error::{IngestError, Result};

/// Maximum source size accepted (500 MB).
pub const MAX_SOURCE_SIZE: u64 = 500 * 1024 * 1024;

/// How a source file is interpreted, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Csv,
    Json,
    /// Anything else; only previewed, never tabulated.
    Text,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Self {
        let extension = path.extension().and_then(|ext| ext.to_str());
        match extension {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }

    pub fn is_structured(self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 byte order marks. A UTF-8 BOM is accepted.
pub fn validate_encoding(path: &Path, bytes: &[u8]) -> Result<()> {
    let encoding = match bytes {
        [0xFF, 0xFE, ..] => "UTF-16 LE",
        [0xFE, 0xFF, ..] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding,
    })
}

/// Reads a whole source after size and encoding checks.
pub fn read_source_bytes(path: &Path) -> Result<Vec<u8>> {
    check_file_size_with_limit(path, MAX_SOURCE_SIZE)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    validate_encoding(path, &bytes)?;
    Ok(bytes)
}

/// Decodes bytes as UTF-8 text without a leading BOM.
pub fn decode_text<'a>(path: &Path, bytes: &'a [u8]) -> Result<&'a str> {
    let text = std::str::from_utf8(bytes).map_err(|_| IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding: "non-UTF-8",
    })?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_extension() {
        assert_eq!(SourceKind::from_path(Path::new("a/Sales.CSV")), SourceKind::Csv);
        assert_eq!(SourceKind::from_path(Path::new("orders.json")), SourceKind::Json);
        assert_eq!(SourceKind::from_path(Path::new("notes.txt")), SourceKind::Text);
        assert_eq!(SourceKind::from_path(Path::new("README")), SourceKind::Text);
    }

    #[test]
    fn utf16_is_rejected() {
        let path = Path::new("x.csv");
        assert!(validate_encoding(path, &[0xFF, 0xFE, 0x41, 0x00]).is_err());
        assert!(validate_encoding(path, b"\xEF\xBB\xBFa,b").is_ok());
        assert!(validate_encoding(path, b"").is_ok());
    }

    #[test]
    fn bom_is_stripped() {
        let text = decode_text(Path::new("x.txt"), "\u{feff}hello".as_bytes()).unwrap();
        assert_eq!(text, "hello");
    }
}
