//! Error types for the cleaning pipeline

use thiserror::Error;

/// Cleaning errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("expected text in column {column:?} at row {label}, found {found}")]
    NonTextCell {
        column: String,
        label: usize,
        found: &'static str,
    },

    #[error("sample fraction must be in (0, 1], got {0}")]
    InvalidFraction(f64),
}

/// Result type alias for cleaning operations
pub type Result<T> = std::result::Result<T, Error>;
