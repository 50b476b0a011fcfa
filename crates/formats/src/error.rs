//! Error types for table and record I/O

use thiserror::Error;

/// Format and I/O errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed record at line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("row has {got} cells but the table has {expected} columns")]
    ColumnMismatch { expected: usize, got: usize },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for format operations
pub type Result<T> = std::result::Result<T, Error>;
