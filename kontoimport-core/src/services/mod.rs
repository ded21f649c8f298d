//! Service layer - the ingestion pipeline
//!
//! Data flows parser → normalize → upload, driven per file by the ingest
//! service, which also persists the run log.

pub mod ingest;
pub mod normalize;
pub mod parser;
pub mod run_log;
pub mod upload;

pub use ingest::{IngestOptions, IngestService, RunOutcome};
pub use normalize::{normalize_record, normalize_records, NormalizedBatch, NormalizedRow};
pub use parser::{ParsedRecord, ParsedTable, HEADER_MARKER};
pub use upload::{BatchUploader, UploadOutcome};

/// Prefix of `s` with at most `max_chars` characters, for log lines
pub(crate) fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
