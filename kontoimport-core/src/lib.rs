//! Kontoimport Core - ingestion of bank statement CSV exports
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Transactions, raw rows, summaries, locale parsing, identity
//! - **ports**: Trait definitions for external dependencies (RemoteStore)
//! - **services**: The pipeline (parser, normalizer, uploader, orchestration)
//! - **adapters**: Concrete implementations (PostgREST over HTTP)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::PostgrestStore;
use config::Config;
use ports::RemoteStore;
use services::IngestService;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{FileStatus, FileSummary, IngestError, RawRow, RunLog, Transaction};
pub use services::{IngestOptions, RunOutcome};

/// Main context for an ingestion run
///
/// Holds the configuration and the services wired to the remote store.
pub struct IngestContext {
    pub config: Config,
    pub ingest_service: IngestService,
}

impl IngestContext {
    /// Load configuration from `work_dir` and connect to the remote store.
    ///
    /// With `dry_run` no remote settings are required and none are used.
    pub fn new(work_dir: &Path, dry_run: bool) -> Result<Self> {
        std::fs::create_dir_all(work_dir)
            .with_context(|| format!("Failed to create working directory: {}", work_dir.display()))?;
        let config = Config::load(work_dir)?;
        Self::with_config(config, dry_run)
    }

    /// Build a context from an already loaded configuration
    pub fn with_config(config: Config, dry_run: bool) -> Result<Self> {
        let store: Option<Arc<dyn RemoteStore>> = if dry_run {
            None
        } else {
            let remote = config.require_remote()?;
            Some(Arc::new(PostgrestStore::new(remote)?))
        };

        let ingest_service = IngestService::new(store, config.clone());
        Ok(Self {
            config,
            ingest_service,
        })
    }
}
