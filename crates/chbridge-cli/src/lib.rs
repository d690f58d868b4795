//! chbridge CLI Library
//!
//! Command-line interface for bulk data transfer between ClickHouse and
//! delimited flat files, driven by an external ingestion service.
//!
//! # Overview
//!
//! - **Export**: ClickHouse table → flat file (`chbridge export`)
//! - **Import**: flat file → ClickHouse table (`chbridge import`)
//! - **Preview**: sample rows before transferring (`chbridge preview`)
//! - **Tables**: list tables for a connection (`chbridge tables`)
//!
//! The interesting part lives in [`transfer`]: the engine that submits a
//! job, reconciles an unreliable status-polling channel into a consistent
//! progress signal, and guarantees exactly one terminal outcome per
//! operation.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod progress;
pub mod transfer;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};
pub use transfer::{FinalOutcome, JobSpec, TransferEngine, TransferEvent};

use chbridge_common::types::ConnectionConfig;
use clap::{Args, Parser, Subcommand};

/// chbridge - ClickHouse ⇄ flat file transfer tool
#[derive(Parser, Debug)]
#[command(name = "chbridge")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Ingestion service URL
    #[arg(
        long,
        env = "CHBRIDGE_SERVER_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    pub server_url: String,
}

/// ClickHouse connection parameters, shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// ClickHouse host
    #[arg(long, env = "CHBRIDGE_HOST", default_value = "localhost")]
    pub host: String,

    /// ClickHouse HTTP port
    #[arg(long, env = "CHBRIDGE_PORT", default_value_t = 8123)]
    pub port: u16,

    /// Database name
    #[arg(long, env = "CHBRIDGE_DATABASE", default_value = "default")]
    pub database: String,

    /// User name
    #[arg(long, env = "CHBRIDGE_USER", default_value = "default")]
    pub user: String,

    /// JWT token or password
    #[arg(
        long,
        env = "CHBRIDGE_JWT_TOKEN",
        default_value = "",
        hide_env_values = true
    )]
    pub jwt_token: String,
}

impl ConnectionArgs {
    /// Build the wire connection config
    pub fn to_config(&self) -> ConnectionConfig {
        ConnectionConfig::new(
            self.host.clone(),
            self.port,
            self.database.clone(),
            self.user.clone(),
        )
        .with_jwt_token(self.jwt_token.clone())
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a ClickHouse table to a delimited flat file
    Export {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Source table name
        #[arg(short, long)]
        table: String,

        /// Columns to export (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Field delimiter for the output file
        #[arg(short, long, default_value = ",")]
        delimiter: String,

        /// Target file path
        #[arg(short, long)]
        output: String,
    },

    /// Import a delimited flat file into a ClickHouse table
    Import {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Target table name
        #[arg(short, long)]
        table: String,

        /// Columns to import (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Field delimiter of the input file
        #[arg(short, long, default_value = ",")]
        delimiter: String,

        /// Source file path
        #[arg(short, long)]
        input: String,

        /// Skip creating the target table before importing
        #[arg(long)]
        no_create_table: bool,
    },

    /// Preview sample rows for a transfer spec (read-only, max 100 rows)
    Preview {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Table name
        #[arg(short, long)]
        table: String,

        /// Columns to preview (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: String,

        /// Preview a flat file instead of the ClickHouse table
        #[arg(short, long)]
        file: Option<String>,

        /// Number of rows to fetch (capped at 100)
        #[arg(short, long, default_value_t = 100)]
        rows: u32,
    },

    /// List the tables visible to a ClickHouse connection
    Tables {
        #[command(flatten)]
        connection: ConnectionArgs,
    },
}
