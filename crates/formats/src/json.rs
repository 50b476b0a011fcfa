//! Single-file JSON array I/O for dataset splits

use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Write records as one JSON array in a single file.
pub fn write_json_array<T, P>(path: P, records: &[T]) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, records)?;
    info!("Wrote {} records to {:?}", records.len(), path);
    Ok(())
}

/// Read a JSON array file back into typed records.
pub fn read_json_array<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path.as_ref())?);
    Ok(serde_json::from_reader(reader)?)
}
