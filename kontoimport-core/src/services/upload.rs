//! Batch uploader - chunked writes to the raw and transaction sinks
//!
//! Every chunk is an independent request. A rejected chunk is recorded and
//! the remaining chunks still go out; nothing is retried.

use serde::Serialize;
use tracing::{error, info};

use crate::config::TableConfig;
use crate::domain::{IngestError, RawRow, Transaction};
use crate::ports::{RemoteStore, Resolution, WriteRequest};
use crate::services::truncate;

/// Result of writing one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Records in accepted chunks
    pub written: usize,
    pub errors: Vec<IngestError>,
}

/// Splits batches into fixed-size chunks and submits them in order
pub struct BatchUploader<'a> {
    store: &'a dyn RemoteStore,
    chunk_size: usize,
}

impl<'a> BatchUploader<'a> {
    /// Create an uploader; a chunk size of 0 is treated as 1
    pub fn new(store: &'a dyn RemoteStore, chunk_size: usize) -> Self {
        Self {
            store,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Insert raw rows, leaving rows that already exist untouched
    pub fn insert_raw(&self, table: &TableConfig, rows: &[RawRow]) -> UploadOutcome {
        self.upload(table, Resolution::IgnoreDuplicates, rows)
    }

    /// Upsert transactions, overwriting rows with the same ID
    pub fn upsert_transactions(&self, table: &TableConfig, transactions: &[Transaction]) -> UploadOutcome {
        self.upload(table, Resolution::MergeDuplicates, transactions)
    }

    fn upload<T: Serialize>(
        &self,
        table: &TableConfig,
        resolution: Resolution,
        records: &[T],
    ) -> UploadOutcome {
        let mut outcome = UploadOutcome::default();

        for (n, chunk) in records.chunks(self.chunk_size).enumerate() {
            let offset = n * self.chunk_size;

            let rows = match chunk
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()
            {
                Ok(rows) => rows,
                Err(e) => {
                    error!(table = %table.name, offset, "Failed to serialize chunk: {}", e);
                    outcome
                        .errors
                        .push(IngestError::chunk(offset, &table.name, e.to_string()));
                    continue;
                }
            };

            let request = WriteRequest {
                table: &table.name,
                on_conflict: &table.on_conflict,
                resolution,
                rows: &rows,
            };

            match self.store.write(&request) {
                Ok(()) => {
                    outcome.written += chunk.len();
                    info!(
                        table = %table.name,
                        chunk = n + 1,
                        rows = chunk.len(),
                        "Chunk written"
                    );
                }
                Err(e) => {
                    let detail = e.detail();
                    error!(
                        table = %table.name,
                        offset,
                        "Chunk rejected: {}",
                        truncate(&detail, 200)
                    );
                    outcome
                        .errors
                        .push(IngestError::chunk(offset, &table.name, detail));
                }
            }
        }

        outcome
    }
}
