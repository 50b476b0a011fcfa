//! Delimited table I/O
//!
//! Loads a header-led CSV fully into memory and writes it back with the
//! leading row-index column that dataframe tooling emits and expects.

use crate::{Result, Table};
use csv::{ReaderBuilder, WriterBuilder};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Read a delimited file into a [`Table`].
///
/// The header row names the columns. A leading header cell that is empty is
/// the row-index column: its values become row labels instead of data.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    info!("Loading table from {:?}", path);

    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let has_index = headers.get(0).map(|h| h.is_empty()).unwrap_or(false);
    let data_start = usize::from(has_index);

    let columns: Vec<String> = headers
        .iter()
        .skip(data_start)
        .map(str::to_string)
        .collect();
    let mut table = Table::new(columns);

    for (position, record) in reader.records().enumerate() {
        let record = record?;
        let label = if has_index {
            record
                .get(0)
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(position)
        } else {
            position
        };
        let cells = record.iter().skip(data_start).map(parse_cell).collect();
        table.push_labeled_row(label, cells)?;
    }

    info!(
        "Loaded {} rows x {} columns",
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

/// Write a [`Table`] as a delimited file, index column first.
pub fn save_csv<P: AsRef<Path>>(path: P, table: &Table) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new().from_path(path)?;

    let mut header = Vec::with_capacity(table.columns().len() + 1);
    header.push("");
    header.extend(table.columns().iter().map(String::as_str));
    writer.write_record(&header)?;

    for row in table.rows() {
        let mut fields = Vec::with_capacity(row.cells.len() + 1);
        fields.push(row.label.to_string());
        fields.extend(row.cells.iter().map(cell_to_field));
        writer.write_record(&fields)?;
    }
    writer.flush()?;

    info!("Wrote {} rows to {:?}", table.len(), path);
    Ok(())
}

/// Empty fields are null; otherwise integers, then floats, then strings.
fn parse_cell(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    Value::from(raw)
}

fn cell_to_field(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_plain_csv() {
        let file = write_temp("article,highlights,id\nfirst text,one,1\nsecond text,two,2\n");
        let table = load_csv(file.path()).unwrap();

        assert_eq!(table.columns(), &["article", "highlights", "id"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "article"), Some(&json!("first text")));
        assert_eq!(table.get(1, "id"), Some(&json!(2)));
        assert_eq!(table.rows()[1].label, 1);
    }

    #[test]
    fn test_load_csv_with_index_column() {
        let file = write_temp(",article,highlights\n3,first,one\n7,second,two\n");
        let table = load_csv(file.path()).unwrap();

        assert_eq!(table.columns(), &["article", "highlights"]);
        assert_eq!(table.rows()[0].label, 3);
        assert_eq!(table.rows()[1].label, 7);
    }

    #[test]
    fn test_cell_typing() {
        let file = write_temp("a,b,c,d\nhello,42,2.5,\n");
        let table = load_csv(file.path()).unwrap();

        assert_eq!(table.get(0, "a"), Some(&json!("hello")));
        assert_eq!(table.get(0, "b"), Some(&json!(42)));
        assert_eq!(table.get(0, "c"), Some(&json!(2.5)));
        assert_eq!(table.get(0, "d"), Some(&Value::Null));
    }

    #[test]
    fn test_round_trip_preserves_index() {
        let mut table = Table::new(vec!["article", "highlights"]);
        table
            .push_labeled_row(5, vec![json!("text one"), json!("sum one")])
            .unwrap();
        table
            .push_labeled_row(9, vec![json!("text two"), Value::Null])
            .unwrap();

        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("csv");
        save_csv(&path, &table).unwrap();
        let loaded = load_csv(&path).unwrap();

        assert_eq!(loaded.columns(), table.columns());
        assert_eq!(loaded.rows()[0].label, 5);
        assert_eq!(loaded.rows()[1].label, 9);
        assert_eq!(loaded.get(0, "article"), Some(&json!("text one")));
        assert_eq!(loaded.get(1, "highlights"), Some(&Value::Null));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let result = load_csv("/nonexistent/input.csv");
        assert!(result.is_err());
    }
}
