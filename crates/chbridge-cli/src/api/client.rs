//! HTTP API client for the ingestion service
//!
//! Provides methods to submit transfer jobs, poll their status, and run the
//! auxiliary table/preview calls. This layer performs exactly one request
//! per call: retry and escalation policy live in the transfer engine.

use crate::api::{endpoints, types::*};
use crate::error::{CliError, Result};
use chbridge_common::types::ConnectionConfig;
use reqwest::Client;
use std::time::Duration;

// ============================================================================
// API Client Constants
// ============================================================================

/// Default timeout for API requests in seconds. Synchronous ingests block
/// until the job finishes, so this is generous.
/// Can be overridden via CHBRIDGE_API_TIMEOUT_SECS environment variable.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 300;

/// Default ingestion service URL when not specified via environment variable.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Hard cap on preview row counts; the service never returns more.
pub const MAX_PREVIEW_ROWS: u32 = 100;

/// API client for the ingestion service
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Result<Self> {
        let timeout_secs = std::env::var("CHBRIDGE_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CHBRIDGE_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());

        Self::new(base_url)
    }

    /// Submit a transfer job
    ///
    /// Returns the raw service response. An `operationId` in the response
    /// means the job runs asynchronously and must be polled; a response
    /// without one is already a final result. A `null` body maps to
    /// `Ok(None)` — the caller reports it as a missing result rather than
    /// dropping it.
    pub async fn submit_ingest(&self, request: &IngestRequest) -> Result<Option<IngestResponse>> {
        let url = endpoints::ingest_url(&self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Fetch the status of a running operation
    ///
    /// The service answers `null` for operations it has no record of;
    /// that maps to `Ok(None)` so the caller can treat it as an unreadable
    /// sample rather than a transport failure.
    pub async fn poll_status(&self, operation_id: &str) -> Result<Option<IngestStatus>> {
        let url = endpoints::ingest_status_url(&self.base_url, operation_id);

        let response = self.client.get(&url).send().await?.error_for_status()?;

        Ok(response.json().await?)
    }

    /// Create the target table ahead of an import
    pub async fn create_table(&self, request: &CreateTableRequest) -> Result<CreateTableResponse> {
        let url = endpoints::create_table_url(&self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Fetch a read-only sample of rows for a transfer spec
    ///
    /// `max_rows` is clamped to [`MAX_PREVIEW_ROWS`].
    pub async fn preview_rows(
        &self,
        request: &PreviewRequest,
    ) -> Result<Vec<Vec<serde_json::Value>>> {
        let url = endpoints::preview_url(&self.base_url);

        let mut request = request.clone();
        request.max_rows = request.max_rows.min(MAX_PREVIEW_ROWS);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Test a ClickHouse connection
    pub async fn test_connection(&self, config: &ConnectionConfig) -> Result<bool> {
        let url = endpoints::connect_url(&self.base_url);

        let response = self
            .client
            .post(&url)
            .json(config)
            .send()
            .await?
            .error_for_status()?;

        let body: ResponseMessage = response.json().await?;
        Ok(body.message == "Connected successfully")
    }

    /// List the tables visible to a connection
    pub async fn list_tables(&self, config: &ConnectionConfig) -> Result<Vec<String>> {
        let url = endpoints::tables_url(&self.base_url);

        let response = self
            .client
            .post(&url)
            .json(config)
            .send()
            .await?
            .error_for_status()?;

        response
            .json()
            .await
            .map_err(|e| CliError::api(format!("Invalid table list from server: {}", e)))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let client = ApiClient::new("http://localhost:8080".to_string()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_default_timeout_covers_synchronous_ingests() {
        // Synchronous ingest responses can take minutes; the default
        // timeout must not cut them off.
        assert_eq!(DEFAULT_API_TIMEOUT_SECS, 300);
    }

    #[tokio::test]
    async fn test_poll_status_null_body_is_none() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/api/ingest/status"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_raw("null", "application/json"),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let status = client.poll_status("op-1").await.unwrap();
        assert!(status.is_none());
    }

    #[tokio::test]
    async fn test_preview_rows_caps_max_rows() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/api/preview"))
            .and(wiremock::matchers::body_partial_json(
                serde_json::json!({ "maxRows": 100 }),
            ))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!([])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let request = PreviewRequest {
            source_type: "ClickHouse".to_string(),
            connection_config: ConnectionConfig::new("localhost", 8123, "default", "default"),
            table_name: "trips".to_string(),
            selected_columns: vec!["id".to_string()],
            delimiter: ",".to_string(),
            source_file_path: None,
            max_rows: 5000,
        };

        let rows = client.preview_rows(&request).await.unwrap();
        assert!(rows.is_empty());
    }
}
