//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - PostgREST over blocking HTTP for the RemoteStore port

pub mod postgrest;

#[cfg(test)]
pub mod postgrest_mock;

pub use postgrest::PostgrestStore;
