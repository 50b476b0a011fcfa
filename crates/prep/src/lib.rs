//! Extraction, preparation, and formatting of fine-tuning data
//!
//! Takes cleaned article/summary tables through three stages: extraction
//! into `{id, text, summary}` records, preparation (task description and
//! output schema attached), and assembly into shuffled supervised
//! fine-tuning examples split into training and validation slices.

pub mod error;
pub mod extract;
pub mod format;
pub mod prepare;
pub mod summary;

pub use error::{Error, Result};
pub use extract::{extract_records, SourceRecord};
pub use format::{
    format_examples, split_examples, FineTuningExample, DEFAULT_TRAIN_SIZE, DEFAULT_VAL_SIZE,
    FORMAT_SHUFFLE_SEED, SYSTEM_MESSAGE,
};
pub use prepare::{prepare_records, PreparedRecord, SUMMARIZATION_TASK};
pub use summary::{
    output_schema, output_schema_json, SummaryPayload, MAX_SUMMARY_CHARS, MIN_SUMMARY_CHARS,
};
