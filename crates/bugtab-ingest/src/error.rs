//! Error types for export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and tokenizing an export.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Export file not found.
    #[error("export file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the export file.
    #[error("failed to read export {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file carries a byte-order mark for an unsupported encoding.
    #[error("unsupported encoding in {path}: {encoding}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// No complete logical record survived assembly.
    #[error("export contains no complete records")]
    EmptyExport,

    /// The tokenizer expected another field where the record ends.
    ///
    /// Fatal for the whole construction: a half-tokenized row would corrupt
    /// column alignment for every row after it. The raw record text is kept
    /// for diagnosis.
    #[error("record truncated at byte {position}, cannot tokenize: {record}")]
    TruncatedRecord { record: String, position: usize },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_carries_path() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/export.csv"),
        };
        assert_eq!(err.to_string(), "export file not found: /data/export.csv");
    }

    #[test]
    fn truncated_record_display_carries_record() {
        let err = IngestError::TruncatedRecord {
            record: "1,2,".to_string(),
            position: 4,
        };
        let text = err.to_string();
        assert!(text.contains("byte 4"));
        assert!(text.contains("1,2,"));
    }
}
