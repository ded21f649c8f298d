//! Ingest command - run the pipeline and report per file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use kontoimport_core::{FileStatus, FileSummary, IngestContext, IngestError, IngestOptions, RunOutcome};

use crate::output;

pub fn run(files: &[PathBuf], work_dir: &Path, dry_run: bool, json: bool) -> Result<()> {
    tracing::debug!(work_dir = %work_dir.display(), files = files.len(), dry_run, "starting run");

    let ctx = IngestContext::new(work_dir, dry_run)
        .context("Failed to initialize ingestion")?;

    let outcome = ctx
        .ingest_service
        .run(files, IngestOptions { dry_run })
        .context("Ingestion run failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.run_log)?);
        return Ok(());
    }

    print_report(&outcome);
    Ok(())
}

fn print_report(outcome: &RunOutcome) {
    println!();
    println!("{}", "INGESTION COMPLETE".bold());
    println!();

    if outcome.run_log.is_empty() {
        output::warning("No files were ingested.");
    } else {
        let mut table = output::create_table();
        table.set_header(vec!["", "File", "Parsed", "Valid", "Raw inserted", "TX upserted", "Errors"]);
        for summary in &outcome.run_log.summaries {
            table.add_row(vec![
                status_mark(summary),
                summary.source_file.clone(),
                summary.parsed.to_string(),
                summary.valid.to_string(),
                summary.inserted_raw.to_string(),
                summary.upserted_tx.to_string(),
                summary.error_count().to_string(),
            ]);
        }
        println!("{}", table);

        for summary in &outcome.run_log.summaries {
            print_errors(summary);
        }
    }

    if outcome.run_log.summaries.iter().any(|s| s.dry_run) {
        println!();
        output::warning("DRY RUN - nothing was written to the remote store");
    }

    for path in &outcome.missing {
        output::error(&format!("File not found: {}", path.display()));
    }

    println!();
    output::info(&format!("Log: {}", outcome.log_path.display()));
}

fn status_mark(summary: &FileSummary) -> String {
    match summary.status() {
        FileStatus::Ok => "ok".green().to_string(),
        FileStatus::Warnings => "warn".yellow().to_string(),
        FileStatus::Failed => "failed".red().to_string(),
    }
}

fn print_errors(summary: &FileSummary) {
    if summary.errors.is_empty() {
        return;
    }

    println!();
    println!("  {}", summary.source_file.bold());
    for error in &summary.errors {
        let line = match error {
            IngestError::Row { row_index, error } => format!("row {}: {}", row_index, error),
            IngestError::Chunk { chunk, table, error } => {
                format!("{} chunk at {}: {}", table, chunk, first_line(error))
            }
            IngestError::File { error } => error.clone(),
        };
        println!("    {}", line.dimmed());
    }
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}
