//! Table cleaning pipeline
//!
//! `TableCleaner` owns one table for its lifetime and applies row and cell
//! transforms in place. Callers that want to keep the original table clone
//! it at the call site; `into_table` hands ownership back when the stages
//! are done.

use crate::error::{Error, Result};
use crate::normalize::TextNormalizer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::collections::HashSet;
use sumprep_formats::Table;
use tracing::{debug, info};

/// Fixed seed for row sub-sampling, so repeated runs keep the same rows.
pub const SUBSAMPLE_SEED: u64 = 42;

/// Sequential cleaning stages over one owned table
pub struct TableCleaner {
    table: Table,
    text_column: String,
    summary_column: String,
    normalizer: TextNormalizer,
}

impl TableCleaner {
    /// Take exclusive ownership of `table`. Column names are checked at
    /// first use by each stage, not here.
    pub fn new(
        table: Table,
        text_column: impl Into<String>,
        summary_column: impl Into<String>,
    ) -> Self {
        let text_column = text_column.into();
        let summary_column = summary_column.into();
        info!(
            "Cleaning {} rows (text column {:?}, summary column {:?})",
            table.len(),
            text_column,
            summary_column
        );
        Self {
            table,
            text_column,
            summary_column,
            normalizer: TextNormalizer::english(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Drop the named columns where present; absent names are ignored.
    pub fn remove_columns<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            let name = name.as_ref();
            if self.table.remove_column(name) {
                debug!("Removed column {:?}", name);
            } else {
                debug!("Column {:?} not present, skipping", name);
            }
        }
    }

    /// Keep a seeded uniform sample of `fraction` of the rows, in their
    /// original relative order. Fractions outside (0, 1] are rejected.
    pub fn subsample(&mut self, fraction: f64) -> Result<()> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(Error::InvalidFraction(fraction));
        }

        let total = self.table.len();
        let keep = ((fraction * total as f64).round() as usize).min(total);
        let mut rng = StdRng::seed_from_u64(SUBSAMPLE_SEED);
        let mut picked = rand::seq::index::sample(&mut rng, total, keep).into_vec();
        picked.sort_unstable();

        let mut picked = picked.into_iter().peekable();
        let mut position = 0;
        self.table.retain_rows(|_| {
            let keep_row = picked.peek() == Some(&position);
            if keep_row {
                picked.next();
            }
            position += 1;
            keep_row
        });

        info!(
            "Sampled {:.1}% of rows, {} remain",
            fraction * 100.0,
            self.table.len()
        );
        Ok(())
    }

    /// Drop rows that duplicate an earlier row across all columns, keeping
    /// the first occurrence.
    pub fn remove_duplicate_rows(&mut self) {
        let before = self.table.len();
        let mut seen = HashSet::with_capacity(before);
        self.table.retain_rows(|row| seen.insert(row.digest()));

        let removed = before - self.table.len();
        if removed > 0 {
            info!("Removed {} duplicate rows", removed);
        } else {
            info!("No duplicate rows found");
        }
    }

    /// Drop rows whose primary text cell is null.
    pub fn remove_missing_text(&mut self) -> Result<()> {
        let column = self.column_index(&self.text_column)?;
        let before = self.table.len();
        self.table.retain_rows(|row| !row.cells[column].is_null());
        info!(
            "Removed {} rows with missing text",
            before - self.table.len()
        );
        Ok(())
    }

    /// Run the full normalization transform over every cell of both text
    /// columns.
    pub fn apply_normalize_text(&mut self) -> Result<()> {
        info!("Normalizing text columns");
        let normalizer = &self.normalizer;
        transform_column(&mut self.table, &self.text_column, &|s| {
            normalizer.normalize(s)
        })?;
        transform_column(&mut self.table, &self.summary_column, &|s| {
            normalizer.normalize(s)
        })
    }

    /// Drop stop words from both text columns, leaving everything else in
    /// the cells untouched.
    pub fn remove_stop_words(&mut self) -> Result<()> {
        info!("Removing stop words");
        let normalizer = &self.normalizer;
        transform_column(&mut self.table, &self.text_column, &|s| {
            normalizer.strip_stop_words(s)
        })?;
        transform_column(&mut self.table, &self.summary_column, &|s| {
            normalizer.strip_stop_words(s)
        })
    }

    /// Lemmatize the whitespace tokens of both text columns.
    pub fn lemmatize(&mut self) -> Result<()> {
        info!("Lemmatizing text columns");
        let normalizer = &self.normalizer;
        transform_column(&mut self.table, &self.text_column, &|s| {
            normalizer.lemmatize_tokens(s)
        })?;
        transform_column(&mut self.table, &self.summary_column, &|s| {
            normalizer.lemmatize_tokens(s)
        })
    }

    /// Keep rows whose primary text has at most `max_words` whitespace
    /// tokens (inclusive). Rows without string text are dropped.
    pub fn limit_row_text_length(&mut self, max_words: usize) -> Result<()> {
        let column = self.column_index(&self.text_column)?;
        let before = self.table.len();
        self.table.retain_rows(|row| match &row.cells[column] {
            Value::String(text) => text.split_whitespace().count() <= max_words,
            _ => false,
        });
        info!(
            "Limited text length to {} words, removed {} rows",
            max_words,
            before - self.table.len()
        );
        Ok(())
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Hand the cleaned table back to the caller.
    pub fn into_table(self) -> Table {
        self.table
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.table
            .column_index(name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }
}

fn transform_column(table: &mut Table, column: &str, f: &dyn Fn(&str) -> String) -> Result<()> {
    let index = table
        .column_index(column)
        .ok_or_else(|| Error::MissingColumn(column.to_string()))?;

    for row in table.rows_mut() {
        let cell = &mut row.cells[index];
        match cell {
            Value::String(text) => *cell = Value::from(f(text)),
            other => {
                return Err(Error::NonTextCell {
                    column: column.to_string(),
                    label: row.label,
                    found: value_kind(other),
                })
            }
        }
    }
    Ok(())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table_with_rows(rows: &[(&str, &str, i64)]) -> Table {
        let mut table = Table::new(vec!["article", "highlights", "id"]);
        for (article, highlights, id) in rows {
            table
                .push_row(vec![json!(article), json!(highlights), json!(id)])
                .unwrap();
        }
        table
    }

    #[test]
    fn test_remove_columns_ignores_absent_names() {
        let table = table_with_rows(&[("text one", "sum one", 1)]);
        let mut cleaner = TableCleaner::new(table, "article", "highlights");

        cleaner.remove_columns(&["id", "nonexistent"]);
        let table = cleaner.into_table();

        assert_eq!(table.columns(), &["article", "highlights"]);
    }

    #[test]
    fn test_remove_columns_keeps_text_columns() {
        let table = table_with_rows(&[("text one", "sum one", 1)]);
        let mut cleaner = TableCleaner::new(table, "article", "highlights");

        cleaner.remove_columns(&["id"]);
        let table = cleaner.into_table();

        assert!(table.has_column("article"));
        assert!(table.has_column("highlights"));
    }

    #[test]
    fn test_subsample_is_deterministic() {
        let rows: Vec<(String, String, i64)> = (0..100)
            .map(|i| (format!("text {i}"), format!("sum {i}"), i))
            .collect();
        let rows_ref: Vec<(&str, &str, i64)> = rows
            .iter()
            .map(|(a, b, c)| (a.as_str(), b.as_str(), *c))
            .collect();

        let mut first = TableCleaner::new(table_with_rows(&rows_ref), "article", "highlights");
        first.subsample(0.2).unwrap();
        let first = first.into_table();

        let mut second = TableCleaner::new(table_with_rows(&rows_ref), "article", "highlights");
        second.subsample(0.2).unwrap();
        let second = second.into_table();

        assert_eq!(first.len(), 20);
        assert_eq!(first, second);

        // original relative order survives sampling
        let labels: Vec<usize> = first.rows().iter().map(|r| r.label).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn test_subsample_rejects_bad_fractions() {
        for fraction in [0.0, -0.5, 1.5, f64::NAN] {
            let table = table_with_rows(&[("text", "sum", 1)]);
            let mut cleaner = TableCleaner::new(table, "article", "highlights");
            assert!(matches!(
                cleaner.subsample(fraction),
                Err(Error::InvalidFraction(_))
            ));
        }
    }

    #[test]
    fn test_subsample_accepts_full_fraction() {
        let table = table_with_rows(&[("a text", "a", 1), ("b text", "b", 2)]);
        let mut cleaner = TableCleaner::new(table, "article", "highlights");
        cleaner.subsample(1.0).unwrap();
        assert_eq!(cleaner.table().len(), 2);
    }

    #[test]
    fn test_remove_duplicate_rows_keeps_first() {
        let table = table_with_rows(&[
            ("same text", "same sum", 1),
            ("other text", "other sum", 2),
            ("same text", "same sum", 1),
        ]);
        let mut cleaner = TableCleaner::new(table, "article", "highlights");
        cleaner.remove_duplicate_rows();
        let table = cleaner.into_table();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].label, 0);
        assert_eq!(table.rows()[1].label, 1);
    }

    #[test]
    fn test_remove_duplicate_rows_is_idempotent() {
        let table = table_with_rows(&[
            ("same text", "same sum", 1),
            ("same text", "same sum", 1),
            ("other text", "other sum", 2),
        ]);
        let mut cleaner = TableCleaner::new(table, "article", "highlights");
        cleaner.remove_duplicate_rows();
        let once = cleaner.table().clone();
        cleaner.remove_duplicate_rows();
        assert_eq!(&once, cleaner.table());
    }

    #[test]
    fn test_remove_missing_text() {
        let mut table = Table::new(vec!["article", "highlights"]);
        table
            .push_row(vec![json!("present"), json!("sum")])
            .unwrap();
        table.push_row(vec![Value::Null, json!("sum")]).unwrap();
        table.push_row(vec![json!("also here"), json!("sum")]).unwrap();

        let mut cleaner = TableCleaner::new(table, "article", "highlights");
        cleaner.remove_missing_text().unwrap();
        let table = cleaner.into_table();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].label, 0);
        assert_eq!(table.rows()[1].label, 2);
    }

    #[test]
    fn test_missing_column_surfaces_at_use() {
        let table = table_with_rows(&[("text", "sum", 1)]);
        // construction succeeds with a bogus column name
        let mut cleaner = TableCleaner::new(table, "body", "highlights");
        // the first stage touching the column reports it
        assert!(matches!(
            cleaner.remove_missing_text(),
            Err(Error::MissingColumn(_))
        ));
    }

    #[test]
    fn test_normalize_rejects_non_text_cells() {
        let mut table = Table::new(vec!["article", "highlights"]);
        table.push_row(vec![json!(42), json!("sum")]).unwrap();

        let mut cleaner = TableCleaner::new(table, "article", "highlights");
        let result = cleaner.apply_normalize_text();
        assert!(matches!(
            result,
            Err(Error::NonTextCell { label: 0, found: "number", .. })
        ));
    }

    #[test]
    fn test_limit_row_text_length_inclusive_bound() {
        let long_text = vec!["word"; 500].join(" ");
        let longer_text = vec!["word"; 501].join(" ");
        let mut table = Table::new(vec!["article", "highlights"]);
        for text in [
            "one two three",
            "one two three four five",
            long_text.as_str(),
            longer_text.as_str(),
        ] {
            table.push_row(vec![json!(text), json!("sum")]).unwrap();
        }

        let mut cleaner = TableCleaner::new(table, "article", "highlights");
        cleaner.limit_row_text_length(500).unwrap();
        let table = cleaner.into_table();

        assert_eq!(table.len(), 3);
        let labels: Vec<usize> = table.rows().iter().map(|r| r.label).collect();
        assert_eq!(labels, vec![0, 1, 2]);
    }

    #[test]
    fn test_limit_row_text_length_drops_non_text_rows() {
        let mut table = Table::new(vec!["article", "highlights"]);
        table.push_row(vec![json!("short text"), json!("sum")]).unwrap();
        table.push_row(vec![Value::Null, json!("sum")]).unwrap();

        let mut cleaner = TableCleaner::new(table, "article", "highlights");
        cleaner.limit_row_text_length(500).unwrap();
        assert_eq!(cleaner.table().len(), 1);
    }

    #[test]
    fn test_narrow_stages_touch_both_columns() {
        let mut table = Table::new(vec!["article", "highlights"]);
        table
            .push_row(vec![json!("the storms arrived"), json!("the cities flooded")])
            .unwrap();

        let mut cleaner = TableCleaner::new(table, "article", "highlights");
        cleaner.remove_stop_words().unwrap();
        cleaner.lemmatize().unwrap();
        let table = cleaner.into_table();

        assert_eq!(table.get(0, "article"), Some(&json!("storm arrived")));
        assert_eq!(table.get(0, "highlights"), Some(&json!("city flooded")));
    }

    #[test]
    fn test_column_removal_then_dedup_then_normalize() {
        // rows differ only in the id column; dropping it makes them
        // identical, dedup collapses them, and normalization can leave an
        // empty cell behind
        let table = table_with_rows(&[
            ("  Hi   to us! http://x.com ", "hi", 1),
            ("  Hi   to us! http://x.com ", "hi", 2),
        ]);
        let mut cleaner = TableCleaner::new(table, "article", "highlights");

        cleaner.remove_columns(&["id"]);
        cleaner.remove_duplicate_rows();
        cleaner.apply_normalize_text().unwrap();
        let table = cleaner.into_table();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "article"), Some(&json!("")));
        assert_eq!(table.get(0, "highlights"), Some(&json!("")));
    }
}
