//! API endpoint URL builders
//!
//! Helper functions to construct ingestion service endpoint URLs.

/// Build ingest submission URL
pub fn ingest_url(base_url: &str) -> String {
    format!("{}/api/ingest", base_url)
}

/// Build ingest status URL for an operation
pub fn ingest_status_url(base_url: &str, operation_id: &str) -> String {
    format!(
        "{}/api/ingest/status?operationId={}",
        base_url,
        urlencoding::encode(operation_id)
    )
}

/// Build create-table URL
pub fn create_table_url(base_url: &str) -> String {
    format!("{}/api/create-table", base_url)
}

/// Build preview URL
pub fn preview_url(base_url: &str) -> String {
    format!("{}/api/preview", base_url)
}

/// Build connection-test URL
pub fn connect_url(base_url: &str) -> String {
    format!("{}/api/clickhouse/connect", base_url)
}

/// Build table-listing URL
pub fn tables_url(base_url: &str) -> String {
    format!("{}/api/clickhouse/tables", base_url)
}
