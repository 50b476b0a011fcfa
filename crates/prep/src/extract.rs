//! Record extraction from cleaned tables

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sumprep_formats::Table;
use tracing::info;

/// One article/summary pair lifted out of a table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceRecord {
    pub id: usize,
    pub text: String,
    pub summary: String,
}

/// Turn the two text columns of a table into a record sequence.
///
/// Ids are reassigned as zero-based positions in the table; any id column
/// the table still carries is ignored.
pub fn extract_records(
    table: &Table,
    text_column: &str,
    summary_column: &str,
) -> Result<Vec<SourceRecord>> {
    let text_index = table
        .column_index(text_column)
        .ok_or_else(|| Error::MissingColumn(text_column.to_string()))?;
    let summary_index = table
        .column_index(summary_column)
        .ok_or_else(|| Error::MissingColumn(summary_column.to_string()))?;

    let mut records = Vec::with_capacity(table.len());
    for (id, row) in table.rows().iter().enumerate() {
        let text = row.cells[text_index]
            .as_str()
            .ok_or_else(|| Error::MalformedRecord {
                id,
                reason: format!("non-text cell in column {:?}", text_column),
            })?;
        let summary = row.cells[summary_index]
            .as_str()
            .ok_or_else(|| Error::MalformedRecord {
                id,
                reason: format!("non-text cell in column {:?}", summary_column),
            })?;
        records.push(SourceRecord {
            id,
            text: text.to_string(),
            summary: summary.to_string(),
        });
    }

    info!("Extracted {} records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serde_json::Value;

    fn sample_table() -> Table {
        let mut table = Table::new(vec!["article", "highlights"]);
        table
            .push_labeled_row(14, vec![json!("first article"), json!("first summary")])
            .unwrap();
        table
            .push_labeled_row(3, vec![json!("second article"), json!("second summary")])
            .unwrap();
        table
    }

    #[test]
    fn test_ids_are_zero_based_positions() {
        let table = sample_table();
        let records = extract_records(&table, "article", "highlights").unwrap();

        // row labels 14 and 3 are ignored; positions win
        assert_eq!(
            records,
            vec![
                SourceRecord {
                    id: 0,
                    text: "first article".to_string(),
                    summary: "first summary".to_string(),
                },
                SourceRecord {
                    id: 1,
                    text: "second article".to_string(),
                    summary: "second summary".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_missing_column() {
        let table = sample_table();
        assert!(matches!(
            extract_records(&table, "body", "highlights"),
            Err(Error::MissingColumn(_))
        ));
    }

    #[test]
    fn test_non_text_cell() {
        let mut table = Table::new(vec!["article", "highlights"]);
        table.push_row(vec![json!("text"), Value::Null]).unwrap();

        assert!(matches!(
            extract_records(&table, "article", "highlights"),
            Err(Error::MalformedRecord { id: 0, .. })
        ));
    }
}
