//! Stable transaction identity

use sha2::{Digest, Sha256};

/// Derive the transaction ID for a row: hex SHA-256 of `"{source_file}:{row_index}"`.
///
/// The input is hashed as UTF-8 bytes without any case or locale folding, so
/// re-ingesting an unchanged file reproduces the same IDs.
pub fn make_id(source_file: &str, row_index: usize) -> String {
    let key = format!("{}:{}", source_file, row_index);
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}
