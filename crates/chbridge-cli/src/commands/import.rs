//! `chbridge import` command implementation
//!
//! Imports a delimited flat file into a ClickHouse table, optionally
//! creating the target table first (failure there is non-fatal so imports
//! into pre-existing tables keep working).

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
    input: String,
    create_table: bool,
    config: &Config,
) -> Result<()> {
    let spec = JobSpec {
        direction: Direction::Import,
        connection,
        table_name: table,
        selected_columns: columns,
        delimiter,
        file_path: input,
        create_table_first: create_table,
    };

    let outcome = super::run_transfer(spec, config).await?;
    super::report_outcome(&outcome, "import")
}
