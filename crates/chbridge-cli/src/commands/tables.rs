//! `chbridge tables` command implementation
//!
//! Lists the tables visible to a ClickHouse connection, after verifying
//! the connection works.

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::progress;
use chbridge_common::types::ConnectionConfig;
use colored::Colorize;

pub async fn run(connection: ConnectionConfig, config: &Config) -> Result<()> {
    let client = ApiClient::new(config.server_url().to_string())?;

    let spinner = progress::create_spinner("Connecting to ClickHouse");
    let connected = client.test_connection(&connection).await;
    spinner.finish_and_clear();

    if !connected? {
        return Err(CliError::api(format!(
            "Could not connect to ClickHouse at {}",
            connection
        )));
    }

    let tables = client.list_tables(&connection).await?;

    if tables.is_empty() {
        println!("No tables found in database '{}'", connection.database);
        return Ok(());
    }

    println!(
        "{} {} table(s) in database '{}':",
        "✓".green(),
        tables.len(),
        connection.database
    );
    for table in tables {
        println!("  {}", table);
    }

    Ok(())
}
