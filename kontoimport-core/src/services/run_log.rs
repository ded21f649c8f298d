//! Run log persistence
//!
//! One pretty-printed JSON array of file summaries per invocation, named
//! after the local start time: `ingestion_log_YYYYMMDD_HHMMSS.json`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::domain::result::Result;
use crate::domain::RunLog;

/// File name for a run started at `started`
pub fn log_file_name(started: &DateTime<Local>) -> String {
    format!("ingestion_log_{}.json", started.format("%Y%m%d_%H%M%S"))
}

/// Write the run log into `work_dir`, creating it if needed.
///
/// Never overwrites an earlier log from the same second; a numeric suffix
/// is appended instead.
pub fn write_run_log(work_dir: &Path, log: &RunLog, started: &DateTime<Local>) -> Result<PathBuf> {
    std::fs::create_dir_all(work_dir)?;

    let base = log_file_name(started);
    let mut path = work_dir.join(&base);
    let mut n = 1;
    while path.exists() {
        let stem = base.trim_end_matches(".json");
        path = work_dir.join(format!("{}_{}.json", stem, n));
        n += 1;
    }

    let content = serde_json::to_string_pretty(log)?;
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Read a run log written by [`write_run_log`]
pub fn read_run_log(path: &Path) -> Result<RunLog> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
