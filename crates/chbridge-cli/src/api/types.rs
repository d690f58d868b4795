//! API request and response types
//!
//! Matches the ingestion service wire format (camelCase JSON).

use chbridge_common::types::{ConnectionConfig, Direction};
use serde::{Deserialize, Serialize};

/// Request to start a transfer job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    /// "ClickHouse" (export) or "FlatFile" (import)
    pub source_type: String,

    pub connection_config: ConnectionConfig,

    pub table_name: String,

    pub selected_columns: Vec<String>,

    pub delimiter: String,

    /// Set for imports: the flat file being read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file_path: Option<String>,

    /// Set for exports: the flat file being written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_file_path: Option<String>,
}

impl IngestRequest {
    /// Build the wire request for a direction, wiring the file path to the
    /// source or target slot as appropriate.
    pub fn new(
        direction: Direction,
        connection_config: ConnectionConfig,
        table_name: String,
        selected_columns: Vec<String>,
        delimiter: String,
        file_path: String,
    ) -> Self {
        let (source_file_path, target_file_path) = match direction {
            Direction::Export => (None, Some(file_path)),
            Direction::Import => (Some(file_path), None),
        };

        Self {
            source_type: direction.source_type().to_string(),
            connection_config,
            table_name,
            selected_columns,
            delimiter,
            source_file_path,
            target_file_path,
        }
    }
}

/// Response from the ingest endpoint
///
/// In async mode only `operationId` is meaningful; in sync/fallback mode
/// the service answers with a complete result instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_processed: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

/// One status-poll payload for a running operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestStatus {
    /// "running", "completed", "error", or anything else (treated as running)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_processed: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_records: Option<u64>,

    /// Estimate the service falls back to when the true total is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_total: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_per_second: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

/// Request to create the target table ahead of an import
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub connection: ConnectionConfig,
    pub table_name: String,
    pub columns: Vec<String>,
    pub source_file_path: String,
}

/// Response from the create-table endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request for a read-only sample of rows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub source_type: String,
    pub connection_config: ConnectionConfig,
    pub table_name: String,
    pub selected_columns: Vec<String>,
    pub delimiter: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file_path: Option<String>,

    pub max_rows: u32,
}

/// Generic message wrapper returned by connection-test style endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub message: String,
}
