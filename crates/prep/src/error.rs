//! Error types for extraction and formatting

use thiserror::Error;

/// Preparation errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("malformed record {id}: {reason}")]
    MalformedRecord { id: usize, reason: String },

    #[error("summary length {chars} outside {min}..={max} characters")]
    SummaryLength {
        chars: usize,
        min: usize,
        max: usize,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for preparation operations
pub type Result<T> = std::result::Result<T, Error>;
