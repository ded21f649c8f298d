//! Per-file summaries and the run log

use serde::{Deserialize, Serialize};

/// A recoverable problem recorded while ingesting one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngestError {
    /// A chunk write rejected by the remote store; `chunk` is the offset of
    /// the chunk's first record within its batch
    Chunk {
        chunk: usize,
        table: String,
        error: String,
    },
    /// A row dropped during normalization
    Row { row_index: usize, error: String },
    /// The whole file could not be processed
    File { error: String },
}

impl IngestError {
    pub fn row(row_index: usize, error: impl Into<String>) -> Self {
        Self::Row {
            row_index,
            error: error.into(),
        }
    }

    pub fn chunk(offset: usize, table: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Chunk {
            chunk: offset,
            table: table.into(),
            error: error.into(),
        }
    }

    pub fn file(error: impl Into<String>) -> Self {
        Self::File {
            error: error.into(),
        }
    }
}

/// Overall outcome of a file, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Ok,
    Warnings,
    Failed,
}

/// Counts and errors for one ingested file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub source_file: String,
    /// Records emitted by the parser (blank rows excluded)
    pub parsed: usize,
    /// Records that passed normalization
    pub valid: usize,
    /// Raw rows in accepted chunks
    pub inserted_raw: usize,
    /// Transactions in accepted chunks
    pub upserted_tx: usize,
    /// True when remote writes were skipped on request
    #[serde(default)]
    pub dry_run: bool,
    pub errors: Vec<IngestError>,
}

impl FileSummary {
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            ..Default::default()
        }
    }

    /// Summary of a file that failed before any row was processed
    pub fn failed(source_file: impl Into<String>, error: impl Into<String>) -> Self {
        let mut summary = Self::new(source_file);
        summary.errors.push(IngestError::file(error));
        summary
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn status(&self) -> FileStatus {
        if self
            .errors
            .iter()
            .any(|e| matches!(e, IngestError::File { .. }))
        {
            FileStatus::Failed
        } else if self.errors.is_empty() {
            FileStatus::Ok
        } else {
            FileStatus::Warnings
        }
    }
}

/// Ordered summaries of one invocation, persisted as a JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunLog {
    pub summaries: Vec<FileSummary>,
}

impl RunLog {
    pub fn push(&mut self, summary: FileSummary) {
        self.summaries.push(summary);
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_wire_shapes() {
        let row = serde_json::to_value(IngestError::row(2, "invalid date: '31.02.2024'")).unwrap();
        assert_eq!(row, json!({"row_index": 2, "error": "invalid date: '31.02.2024'"}));

        let chunk = serde_json::to_value(IngestError::chunk(50, "transactions", "boom")).unwrap();
        assert_eq!(chunk, json!({"chunk": 50, "table": "transactions", "error": "boom"}));
    }

    #[test]
    fn test_errors_round_trip_through_run_log() {
        let mut summary = FileSummary::new("a.csv");
        summary.errors.push(IngestError::chunk(0, "raw_ing_exports", "x"));
        summary.errors.push(IngestError::row(4, "invalid amount: ''"));
        let log = RunLog {
            summaries: vec![summary, FileSummary::failed("b.csv", "no header")],
        };

        let text = serde_json::to_string(&log).unwrap();
        assert!(text.starts_with('['));
        let back: RunLog = serde_json::from_str(&text).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn test_status() {
        let mut summary = FileSummary::new("a.csv");
        assert_eq!(summary.status(), FileStatus::Ok);
        summary.errors.push(IngestError::row(0, "invalid date"));
        assert_eq!(summary.status(), FileStatus::Warnings);
        assert_eq!(FileSummary::failed("b.csv", "missing").status(), FileStatus::Failed);
    }
}
