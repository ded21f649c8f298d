//! Kontoimport CLI - load bank statement exports into the remote store

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod ingest;
mod logging;
mod output;

/// Ingest bank statement CSV exports (semicolon-delimited, Latin-1)
#[derive(Parser)]
#[command(name = "kontoimport", version, about, long_about = None)]
struct Cli {
    /// CSV export files to ingest
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Parse and validate only, without writing to the remote store
    #[arg(long)]
    dry_run: bool,

    /// Print the run log as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Directory for settings.json and run logs
    #[arg(long, env = "KONTOIMPORT_DIR", default_value = ".tmp")]
    work_dir: PathBuf,

    /// Show debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    ingest::run(&cli.files, &cli.work_dir, cli.dry_run, cli.json)
}
