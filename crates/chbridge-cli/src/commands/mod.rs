//! CLI command implementations

pub mod export;
pub mod import;
pub mod preview;
pub mod tables;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::progress;
use crate::transfer::{
    EngineConfig, FinalOutcome, JobSpec, PollerConfig, TransferEngine, TransferEvent,
};
use colored::Colorize;
use std::sync::Arc;

/// Run one transfer operation with a terminal progress bar.
///
/// The engine reports progress and the single final outcome through its
/// event callback; this helper only renders.
pub(crate) async fn run_transfer(spec: JobSpec, config: &Config) -> Result<FinalOutcome> {
    let client = Arc::new(ApiClient::new(config.server_url().to_string())?);
    let engine = TransferEngine::with_config(
        client,
        EngineConfig {
            poll: PollerConfig {
                interval: config.poll_interval(),
                ..Default::default()
            },
        },
    );

    let pb = progress::create_transfer_bar(&format!(
        "{} '{}' ({} columns)",
        match spec.direction {
            chbridge_common::Direction::Export => "Exporting",
            chbridge_common::Direction::Import => "Importing",
        },
        spec.clean_table_name(),
        spec.selected_columns.len(),
    ));

    let outcome = engine
        .run(&spec, |event| match event {
            TransferEvent::Progress(state) => progress::render_state(&pb, &state),
            TransferEvent::Final(outcome) => {
                if outcome.success {
                    pb.set_position(100);
                    pb.finish_with_message("Completed");
                } else {
                    pb.abandon_with_message("Failed");
                }
            }
        })
        .await?;

    Ok(outcome)
}

/// Print a success summary, or surface the failure as an error so the
/// process exits non-zero. Exactly one result is ever shown per operation.
pub(crate) fn report_outcome(outcome: &FinalOutcome, verb: &str) -> Result<()> {
    if outcome.success {
        println!("{} Data {} completed", "✓".green().bold(), verb);
        if let Some(records) = outcome.records_processed {
            println!("  {} records processed", progress::format_count(records));
        }
        if let Some(ms) = outcome.execution_time_ms {
            println!("  Execution time: {}ms", ms);
        }
        if let Some(ref message) = outcome.message {
            println!("  {}", message);
        }
        Ok(())
    } else {
        Err(CliError::api(
            outcome
                .message
                .clone()
                .unwrap_or_else(|| format!("Data {} failed", verb)),
        ))
    }
}
