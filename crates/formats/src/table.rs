//! In-memory table of uniform-schema rows

use crate::{Error, Result};
use serde_json::{Map, Value};

/// A single table row.
///
/// Cells are positionally aligned with the owning table's column list. The
/// `label` is the zero-based position the row had in its source file; it
/// survives filtering so a saved table reproduces the index column of its
/// input.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub label: usize,
    pub cells: Vec<Value>,
}

impl Row {
    pub fn new(label: usize, cells: Vec<Value>) -> Self {
        Self { label, cells }
    }

    /// Digest of the cell tuple. The label is excluded: two rows holding
    /// identical data are duplicates even when they came from different
    /// source lines.
    pub fn digest(&self) -> u64 {
        let mut buf = String::new();
        for cell in &self.cells {
            buf.push_str(&cell.to_string());
            buf.push('\u{1f}');
        }
        seahash::hash(buf.as_bytes())
    }
}

/// An ordered collection of rows sharing one column set.
///
/// Cell values are restricted to strings, numbers, and null by the loaders;
/// nothing in the table itself enforces that beyond the loaders' parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Append a row, labeling it with its position in the table.
    pub fn push_row(&mut self, cells: Vec<Value>) -> Result<()> {
        let label = self.rows.len();
        self.push_labeled_row(label, cells)
    }

    /// Append a row carrying an explicit source label.
    pub fn push_labeled_row(&mut self, label: usize, cells: Vec<Value>) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(Error::ColumnMismatch {
                expected: self.columns.len(),
                got: cells.len(),
            });
        }
        self.rows.push(Row::new(label, cells));
        Ok(())
    }

    /// Drop a column from the schema and every row. Returns whether the
    /// column was present.
    pub fn remove_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.cells.remove(idx);
        }
        true
    }

    /// Keep only the rows the predicate accepts, preserving order.
    pub fn retain_rows<F: FnMut(&Row) -> bool>(&mut self, f: F) {
        self.rows.retain(f);
    }

    /// Cell lookup by column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r.cells[idx])
    }

    /// A row rendered as a JSON object keyed by column name.
    pub fn row_object(&self, row: &Row) -> Map<String, Value> {
        self.columns
            .iter()
            .cloned()
            .zip(row.cells.iter().cloned())
            .collect()
    }
}
