//! `chbridge export` command implementation
//!
//! Exports a ClickHouse table to a delimited flat file.

use crate::config::Config;
use crate::error::Result;
use crate::transfer::JobSpec;
use chbridge_common::types::{ConnectionConfig, Direction};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    connection: ConnectionConfig,
    table: String,
    columns: Vec<String>,
    delimiter: String,
    output: String,
    config: &Config,
) -> Result<()> {
    let spec = JobSpec {
        direction: Direction::Export,
        connection,
        table_name: table,
        selected_columns: columns,
        delimiter,
        file_path: output,
        create_table_first: false,
    };

    let outcome = super::run_transfer(spec, config).await?;
    super::report_outcome(&outcome, "export")
}
