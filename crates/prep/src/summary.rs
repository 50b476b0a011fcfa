//! Validated summary payload and its JSON schema

use crate::error::{Error, Result};
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shortest acceptable summary, in characters.
pub const MIN_SUMMARY_CHARS: usize = 10;
/// Longest acceptable summary, in characters.
pub const MAX_SUMMARY_CHARS: usize = 300;

/// Structured output of the summarization model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SummaryPayload {
    /// summarized text.
    #[schemars(length(min = 10, max = 300))]
    pub summarized_text: String,
}

impl SummaryPayload {
    /// Validate the declared length bounds. Out-of-range summaries are
    /// rejected, never truncated.
    pub fn new(summarized_text: impl Into<String>) -> Result<Self> {
        let summarized_text = summarized_text.into();
        let chars = summarized_text.chars().count();
        if !(MIN_SUMMARY_CHARS..=MAX_SUMMARY_CHARS).contains(&chars) {
            return Err(Error::SummaryLength {
                chars,
                min: MIN_SUMMARY_CHARS,
                max: MAX_SUMMARY_CHARS,
            });
        }
        Ok(Self { summarized_text })
    }
}

/// The payload's JSON schema.
pub fn output_schema() -> RootSchema {
    schemars::schema_for!(SummaryPayload)
}

/// The schema rendered as the pretty-printed string embedded in prepared
/// records.
pub fn output_schema_json() -> String {
    serde_json::to_string_pretty(&output_schema()).expect("schema serialization cannot fail")
}
