//! Format detection and uniform record access
//!
//! The inspection commands accept either delimited tables or JSONL record
//! files; this module dispatches on the file extension and renders both as
//! JSON objects.

use crate::{delimited, jsonl::JsonlReader, Error, Result};
use serde_json::Value;
use std::path::Path;

/// Supported source file kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Jsonl,
}

/// Detect the source kind from the file extension.
///
/// `.csv` is a delimited table; `.jsonl`, `.json`, and `.gz` are treated as
/// (possibly compressed) JSON Lines.
pub fn detect_format<P: AsRef<Path>>(path: P) -> Result<SourceKind> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| Error::UnsupportedFormat("no file extension found".to_string()))?;

    match extension {
        "csv" => Ok(SourceKind::Csv),
        "jsonl" | "json" | "gz" => Ok(SourceKind::Jsonl),
        other => Err(Error::UnsupportedFormat(format!(
            "unsupported file extension: {}",
            other
        ))),
    }
}

/// Load up to `limit` records of a source file as JSON objects.
pub fn preview<P: AsRef<Path>>(path: P, limit: usize) -> Result<Vec<Value>> {
    let path = path.as_ref();
    match detect_format(path)? {
        SourceKind::Csv => {
            let table = delimited::load_csv(path)?;
            Ok(table
                .rows()
                .iter()
                .take(limit)
                .map(|row| Value::Object(table.row_object(row)))
                .collect())
        }
        SourceKind::Jsonl => JsonlReader::open(path)?.take(limit).collect(),
    }
}

/// Count the records in a source file.
pub fn count_records<P: AsRef<Path>>(path: P) -> Result<usize> {
    let path = path.as_ref();
    match detect_format(path)? {
        SourceKind::Csv => Ok(delimited::load_csv(path)?.len()),
        SourceKind::Jsonl => {
            let mut count = 0;
            for value in JsonlReader::open(path)? {
                value?;
                count += 1;
            }
            Ok(count)
        }
    }
}
