//! Text cleaning for summarization tables
//!
//! This crate provides the sequential cleaning pipeline applied to raw
//! article/summary tables before extraction: column pruning, seeded
//! sub-sampling, duplicate and missing-row removal, and the text
//! normalization transform with its stop-word and lemmatization stages.

pub mod cleaner;
pub mod error;
pub mod lemmatize;
pub mod normalize;
pub mod stopwords;

pub use cleaner::{TableCleaner, SUBSAMPLE_SEED};
pub use error::{Error, Result};
pub use lemmatize::Lemmatizer;
pub use normalize::TextNormalizer;
pub use stopwords::StopWords;
