//! Result and error types for the core library

use std::path::PathBuf;

use thiserror::Error;

/// Core library error type
///
/// Row and chunk failures are not errors at this level; they are collected
/// as [`IngestError`](super::IngestError) entries on the file summary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("No table header found (expected a line starting with '{marker}')")]
    HeaderNotFound { marker: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote store error{}: {detail}", status_suffix(.status))]
    Remote { status: Option<u16>, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a remote error from a rejected response
    pub fn remote(status: u16, detail: impl Into<String>) -> Self {
        Self::Remote {
            status: Some(status),
            detail: detail.into(),
        }
    }

    /// Create a remote error for a request that never got a response
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Remote {
            status: None,
            detail: detail.into(),
        }
    }

    /// Detail text suitable for a summary entry.
    ///
    /// Remote errors report the response body alone, everything else its
    /// display form.
    pub fn detail(&self) -> String {
        match self {
            Error::Remote { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
