//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The ingestion
//! pipeline depends only on these traits, not on concrete implementations.

mod remote_store;

pub use remote_store::{RemoteStore, Resolution, WriteRequest};
