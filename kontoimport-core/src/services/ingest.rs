//! Ingest service - drives files through parse, normalize and upload

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::domain::{FileSummary, IngestError, RunLog};
use crate::ports::RemoteStore;
use crate::services::normalize::normalize_records;
use crate::services::parser::parse_file;
use crate::services::run_log::write_run_log;
use crate::services::upload::BatchUploader;

/// Options for one invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Parse and normalize only, skip remote writes
    pub dry_run: bool,
}

/// Result of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_log: RunLog,
    /// Arguments that did not exist; not part of the run log
    pub missing: Vec<PathBuf>,
    pub log_path: PathBuf,
}

/// Ingest service for bank CSV exports
pub struct IngestService {
    store: Option<Arc<dyn RemoteStore>>,
    config: Config,
}

impl IngestService {
    /// Create the service. `store` may be `None` for dry runs only.
    pub fn new(store: Option<Arc<dyn RemoteStore>>, config: Config) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ingest every path in order, then persist the run log.
    ///
    /// Missing files are logged and skipped; every other file gets a summary.
    pub fn run(&self, paths: &[PathBuf], options: IngestOptions) -> Result<RunOutcome> {
        if !options.dry_run && self.store.is_none() {
            return Err(Error::config("Remote store required unless running dry"));
        }

        let started = Local::now();
        let mut run_log = RunLog::default();
        let mut missing = Vec::new();

        for path in paths {
            if !path.exists() {
                error!(path = %path.display(), "File not found");
                missing.push(path.clone());
                continue;
            }
            run_log.push(self.ingest_file(path, options));
        }

        let log_path = write_run_log(&self.config.work_dir, &run_log, &started)?;
        info!(path = %log_path.display(), "Run log written");

        Ok(RunOutcome {
            run_log,
            missing,
            log_path,
        })
    }

    /// Ingest a single file. Never fails; problems end up in the summary.
    pub fn ingest_file(&self, path: &Path, options: IngestOptions) -> FileSummary {
        let source_file = source_file_name(path);
        info!(source_file = %source_file, "Starting ingestion");

        let table = match parse_file(path) {
            Ok(table) => table,
            Err(e) => {
                error!(source_file = %source_file, "Cannot ingest file: {}", e);
                return FileSummary::failed(source_file, e.to_string());
            }
        };

        let mut summary = FileSummary::new(&source_file);
        summary.parsed = table.records.len();
        summary.dry_run = options.dry_run;

        if table.records.is_empty() {
            warn!(source_file = %source_file, "No data rows found");
            return summary;
        }

        let batch = normalize_records(&source_file, &table.records);
        summary.valid = batch.raw_rows.len();
        summary.errors.extend(batch.errors);

        if options.dry_run {
            info!(source_file = %source_file, valid = summary.valid, "Dry run, skipping upload");
            return summary;
        }

        let Some(store) = self.store.as_deref() else {
            summary
                .errors
                .push(IngestError::file("Remote store not configured"));
            return summary;
        };

        let uploader = BatchUploader::new(store, self.config.chunk_size);

        let raw = uploader.insert_raw(&self.config.raw_table, &batch.raw_rows);
        summary.inserted_raw = raw.written;
        summary.errors.extend(raw.errors);

        let tx = uploader.upsert_transactions(&self.config.transactions_table, &batch.transactions);
        summary.upserted_tx = tx.written;
        summary.errors.extend(tx.errors);

        info!(
            source_file = %source_file,
            parsed = summary.parsed,
            valid = summary.valid,
            inserted_raw = summary.inserted_raw,
            upserted_tx = summary.upserted_tx,
            errors = summary.error_count(),
            "Finished ingestion"
        );
        summary
    }
}

/// File name component used as provenance, independent of the directory
fn source_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
