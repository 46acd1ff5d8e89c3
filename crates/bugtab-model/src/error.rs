use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by table operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to write a serialized table to disk.
    #[error("failed to write table to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A named column is required but absent from the header.
    #[error("column '{column}' not found in header")]
    ColumnNotFound { column: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelError::ColumnNotFound {
            column: "severity".to_string(),
        };
        assert_eq!(err.to_string(), "column 'severity' not found in header");
    }
}
