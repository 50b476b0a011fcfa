//! Streaming JSONL (JSON Lines) reader and writer
//!
//! Reads newline-delimited JSON with automatic gzip decompression. A line
//! that fails to parse aborts the read: this is batch tooling whose operator
//! fixes the input and re-runs, so malformed records are surfaced, never
//! skipped.

use crate::{Error, Result};
use flate2::read::GzDecoder;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Streaming JSONL reader that processes input line-by-line
pub struct JsonlReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    bytes_read: u64,
    total_bytes: Option<u64>,
}

impl JsonlReader<Box<dyn Read>> {
    /// Open a JSONL file, auto-detecting gzip compression by extension
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let total_bytes = file.metadata()?.len();

        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => {
                debug!("Opening gzip-compressed JSONL file: {:?}", path);
                let reader: Box<dyn Read> = Box::new(GzDecoder::new(file));
                Ok(Self::with_total(reader, None))
            }
            _ => {
                debug!("Opening plain JSONL file: {:?}", path);
                let reader: Box<dyn Read> = Box::new(file);
                Ok(Self::with_total(reader, Some(total_bytes)))
            }
        }
    }
}

impl<R: Read> JsonlReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_total(reader, None)
    }

    fn with_total(reader: R, total_bytes: Option<u64>) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            bytes_read: 0,
            total_bytes,
        }
    }

    /// Number of lines consumed so far, blank lines included
    pub fn lines_processed(&self) -> usize {
        self.line_number
    }

    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Total input size, if known (unknown for compressed input)
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }
}

impl<R: Read> Iterator for JsonlReader<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();

        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(n) => {
                    self.bytes_read += n as u64;
                    self.line_number += 1;

                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    return Some(serde_json::from_str::<Value>(trimmed).map_err(|e| {
                        Error::MalformedLine {
                            line: self.line_number,
                            reason: e.to_string(),
                        }
                    }));
                }
                Err(e) => return Some(Err(Error::Io(e))),
            }
        }
    }
}

/// Read a whole JSONL file into typed records.
pub fn read_jsonl<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = JsonlReader::open(path)?;
    let mut records = Vec::new();
    while let Some(value) = reader.next() {
        let value = value?;
        let line = reader.lines_processed();
        let record = serde_json::from_value(value).map_err(|e| Error::MalformedLine {
            line,
            reason: e.to_string(),
        })?;
        records.push(record);
    }
    info!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Write records as one JSON object per line.
pub fn write_jsonl<T, P>(path: P, records: &[T]) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    info!("Wrote {} records to {:?}", records.len(), path);
    Ok(())
}

/// Deterministically shuffle records in place with a fixed seed.
pub fn shuffle_records<T>(records: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    records.shuffle(&mut rng);
}
