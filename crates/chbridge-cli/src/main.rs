//! chbridge CLI - Main entry point

use chbridge_cli::{Cli, Commands, Config};
use chbridge_common::logging::{init_logging, LogConfig, LogLevel};
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Load .env if present; environment variables take precedence
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging: environment first, then the verbose flag. The
    // console default is Warn so log lines stay off the progress bar.
    let mut log_config = LogConfig::from_env().unwrap_or_default();
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    } else if std::env::var("LOG_LEVEL").is_err() {
        log_config.level = LogLevel::Warn;
    }

    // Initialize logging (the CLI still works without it)
    let _ = init_logging(&log_config);

    // Execute command
    let result = execute_command(&cli).await;

    // Handle result
    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> chbridge_cli::Result<()> {
    let mut config = Config::from_env()?;
    config.server_url = cli.server_url.clone();
    config.verbose = cli.verbose;

    match &cli.command {
        Commands::Export {
            connection,
            table,
            columns,
            delimiter,
            output,
        } => {
            chbridge_cli::commands::export::run(
                connection.to_config(),
                table.clone(),
                columns.clone(),
                delimiter.clone(),
                output.clone(),
                &config,
            )
            .await
        }

        Commands::Import {
            connection,
            table,
            columns,
            delimiter,
            input,
            no_create_table,
        } => {
            chbridge_cli::commands::import::run(
                connection.to_config(),
                table.clone(),
                columns.clone(),
                delimiter.clone(),
                input.clone(),
                !no_create_table,
                &config,
            )
            .await
        }

        Commands::Preview {
            connection,
            table,
            columns,
            delimiter,
            file,
            rows,
        } => {
            chbridge_cli::commands::preview::run(
                connection.to_config(),
                table.clone(),
                columns.clone(),
                delimiter.clone(),
                file.clone(),
                *rows,
                &config,
            )
            .await
        }

        Commands::Tables { connection } => {
            chbridge_cli::commands::tables::run(connection.to_config(), &config).await
        }
    }
}
