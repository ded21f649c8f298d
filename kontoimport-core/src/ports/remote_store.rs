//! Remote store port - conflict-aware bulk writes

use serde_json::Value as JsonValue;

use crate::domain::result::Result;

/// What the store does when a row collides with an existing key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep the stored row, drop the incoming one
    IgnoreDuplicates,
    /// Overwrite the stored row with the incoming one
    MergeDuplicates,
}

impl Resolution {
    /// Directive value as understood by the store
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::IgnoreDuplicates => "ignore-duplicates",
            Resolution::MergeDuplicates => "merge-duplicates",
        }
    }
}

/// One bulk write request: a single chunk of rows for one table
#[derive(Debug, Clone, Copy)]
pub struct WriteRequest<'a> {
    pub table: &'a str,
    /// Comma-separated key columns the resolution applies to
    pub on_conflict: &'a str,
    pub resolution: Resolution,
    pub rows: &'a [JsonValue],
}

/// Bulk write endpoint of the remote datastore
///
/// Each call is a synchronous request/response. Implementations return
/// `Error::Remote` for any rejected or failed request and never retry.
pub trait RemoteStore: Send + Sync {
    fn write(&self, request: &WriteRequest<'_>) -> Result<()>;
}
