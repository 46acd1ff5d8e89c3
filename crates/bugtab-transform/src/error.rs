use thiserror::Error;

/// Errors raised by table transforms.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column the transform depends on is absent from the header.
    #[error("required column '{column}' missing from the export header")]
    MissingColumn { column: String },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
