//! Table and record I/O for summarization datasets
//!
//! This crate provides the in-memory table model plus loaders and writers
//! for the pipeline's interchange formats: delimited tables, newline-
//! delimited JSON, and single-file JSON arrays.

pub mod delimited;
pub mod error;
pub mod json;
pub mod jsonl;
pub mod source;
pub mod table;

pub use delimited::{load_csv, save_csv};
pub use error::{Error, Result};
pub use json::{read_json_array, write_json_array};
pub use jsonl::{read_jsonl, shuffle_records, write_jsonl, JsonlReader};
pub use source::{count_records, detect_format, preview, SourceKind};
pub use table::{Row, Table};
