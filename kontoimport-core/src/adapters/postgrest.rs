//! PostgREST adapter for the remote store port
//!
//! Writes go to `POST {url}/rest/v1/{table}` with a `Prefer` header carrying
//! the conflict resolution. Used against a Supabase project.

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::RemoteConfig;
use crate::domain::result::{Error, Result};
use crate::ports::{RemoteStore, WriteRequest};

/// Blocking HTTP client for a PostgREST endpoint
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    api_key: String,
    bearer_token: String,
}

impl PostgrestStore {
    /// Create a store client from validated remote settings.
    ///
    /// Uses the transport's default timeout.
    pub fn new(remote: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: remote.url.trim_end_matches('/').to_string(),
            api_key: remote.api_key.clone(),
            bearer_token: remote.bearer_token.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::transport("Request to remote store timed out")
        } else if error.is_connect() {
            Error::transport(format!("Unable to connect to remote store: {}", error))
        } else {
            Error::transport(format!("Remote store request failed: {}", error))
        }
    }
}

impl RemoteStore for PostgrestStore {
    fn write(&self, request: &WriteRequest<'_>) -> Result<()> {
        let prefer = format!("resolution={},return=minimal", request.resolution.as_str());
        debug!(
            table = request.table,
            rows = request.rows.len(),
            prefer = %prefer,
            "Posting chunk"
        );

        let response = self
            .client
            .post(self.table_url(request.table))
            .query(&[("on_conflict", request.on_conflict)])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.bearer_token)
            .header("Prefer", prefer)
            .json(request.rows)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        let detail = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_string()
        } else {
            body
        };
        Err(Error::remote(status.as_u16(), detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::postgrest_mock::{MockConfig, MockPostgrestServer};
    use crate::ports::Resolution;
    use serde_json::json;

    fn store_for(server: &MockPostgrestServer) -> PostgrestStore {
        let remote = RemoteConfig::new(&server.base_url(), "anon_key", Some("service_token")).unwrap();
        PostgrestStore::new(&remote).unwrap()
    }

    #[test]
    fn test_write_sends_headers_and_body() {
        let server = MockPostgrestServer::start(MockConfig::default()).unwrap();
        let store = store_for(&server);
        let rows = vec![json!({"transaction_id": "abc", "amount": "1.50"})];

        store
            .write(&WriteRequest {
                table: "transactions",
                on_conflict: "transaction_id",
                resolution: Resolution::MergeDuplicates,
                rows: &rows,
            })
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/rest/v1/transactions?on_conflict=transaction_id");
        assert_eq!(req.header("apikey"), Some("anon_key"));
        assert_eq!(req.header("authorization"), Some("Bearer service_token"));
        assert_eq!(
            req.header("prefer"),
            Some("resolution=merge-duplicates,return=minimal")
        );
        let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(body, json!(rows));
    }

    #[test]
    fn test_ignore_duplicates_directive() {
        let server = MockPostgrestServer::start(MockConfig::default()).unwrap();
        let store = store_for(&server);
        let rows = vec![json!({"source_file": "a.csv", "row_index": 0})];

        store
            .write(&WriteRequest {
                table: "raw_ing_exports",
                on_conflict: "source_file,row_index",
                resolution: Resolution::IgnoreDuplicates,
                rows: &rows,
            })
            .unwrap();

        let req = &server.requests()[0];
        assert_eq!(req.path, "/rest/v1/raw_ing_exports?on_conflict=source_file%2Crow_index");
        assert_eq!(
            req.header("prefer"),
            Some("resolution=ignore-duplicates,return=minimal")
        );
    }

    #[test]
    fn test_rejected_write_carries_status_and_detail() {
        let server = MockPostgrestServer::start(MockConfig {
            reject_requests: vec![0],
            ..Default::default()
        })
        .unwrap();
        let store = store_for(&server);
        let rows = vec![json!({})];

        let err = store
            .write(&WriteRequest {
                table: "transactions",
                on_conflict: "transaction_id",
                resolution: Resolution::MergeDuplicates,
                rows: &rows,
            })
            .unwrap_err();

        match err {
            Error::Remote { status, detail } => {
                assert_eq!(status, Some(400));
                assert!(detail.contains("rejected by mock"), "detail: {}", detail);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_store_is_transport_error() {
        let remote = RemoteConfig::new("http://127.0.0.1:1", "k", None).unwrap();
        let store = PostgrestStore::new(&remote).unwrap();
        let rows = vec![json!({})];

        let err = store
            .write(&WriteRequest {
                table: "transactions",
                on_conflict: "transaction_id",
                resolution: Resolution::MergeDuplicates,
                rows: &rows,
            })
            .unwrap_err();

        assert!(matches!(err, Error::Remote { status: None, .. }));
    }
}
