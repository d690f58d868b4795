//! `chbridge preview` command implementation
//!
//! Fetches a read-only sample of rows for a transfer spec and renders it
//! as a table. Never has side effects on either end.

use crate::api::{client::MAX_PREVIEW_ROWS, ApiClient, PreviewRequest};
use crate::config::Config;
use crate::error::{CliError, Result};
use chbridge_common::types::{ConnectionConfig, Direction};
use comfy_table::Table;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    connection: ConnectionConfig,
    table: String,
    columns: Vec<String>,
    delimiter: String,
    file: Option<String>,
    rows: u32,
    config: &Config,
) -> Result<()> {
    if columns.is_empty() {
        return Err(CliError::validation(
            "at least one column must be selected",
        ));
    }

    // Previewing a file means the import direction; otherwise ClickHouse.
    let direction = if file.is_some() {
        Direction::Import
    } else {
        Direction::Export
    };

    let request = PreviewRequest {
        source_type: direction.source_type().to_string(),
        connection_config: connection,
        table_name: table,
        selected_columns: columns.clone(),
        delimiter,
        source_file_path: file,
        max_rows: rows.min(MAX_PREVIEW_ROWS),
    };

    let client = ApiClient::new(config.server_url().to_string())?;
    let preview = client.preview_rows(&request).await?;

    let mut output = Table::new();
    output.set_header(columns);

    for row in &preview {
        output.add_row(row.iter().map(cell_text));
    }

    println!("{}", output);
    println!("Showing first {} row(s)", preview.len());

    Ok(())
}

/// Render one preview cell; JSON null shows as NULL like the service UI.
fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "NULL".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&serde_json::Value::Null), "NULL");
        assert_eq!(cell_text(&serde_json::json!("abc")), "abc");
        assert_eq!(cell_text(&serde_json::json!(42)), "42");
        assert_eq!(cell_text(&serde_json::json!(1.5)), "1.5");
    }
}
