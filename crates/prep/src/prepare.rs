//! Task and output-scheme attachment

use crate::extract::SourceRecord;
use crate::summary::output_schema_json;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Task description embedded in every prepared record.
pub const SUMMARIZATION_TASK: &str = "summarized the given text and save the response as JSON";

/// A record carrying everything the formatter needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreparedRecord {
    pub id: usize,
    pub task: String,
    pub output_scheme: String,
    pub text: String,
    pub summary: String,
}

/// Attach the fixed task string and the output schema to each record.
pub fn prepare_records(records: Vec<SourceRecord>) -> Vec<PreparedRecord> {
    let scheme = output_schema_json();
    let prepared: Vec<PreparedRecord> = records
        .into_iter()
        .map(|record| PreparedRecord {
            id: record.id,
            task: SUMMARIZATION_TASK.to_string(),
            output_scheme: scheme.clone(),
            text: record.text,
            summary: record.summary,
        })
        .collect();

    info!("Prepared {} records for fine-tuning", prepared.len());
    prepared
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_attaches_task_and_scheme() {
        let records = vec![SourceRecord {
            id: 0,
            text: "article body".to_string(),
            summary: "short form".to_string(),
        }];

        let prepared = prepare_records(records);

        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared[0].id, 0);
        assert_eq!(prepared[0].task, SUMMARIZATION_TASK);
        assert_eq!(prepared[0].text, "article body");
        assert_eq!(prepared[0].summary, "short form");
        assert!(prepared[0].output_scheme.contains("summarized_text"));
    }

    #[test]
    fn test_prepare_preserves_order_and_ids() {
        let records: Vec<SourceRecord> = (0..5)
            .map(|id| SourceRecord {
                id,
                text: format!("text {id}"),
                summary: format!("summary {id}"),
            })
            .collect();

        let prepared = prepare_records(records);
        let ids: Vec<usize> = prepared.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}
