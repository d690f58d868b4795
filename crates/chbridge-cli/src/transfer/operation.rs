//! Job specification, validation, and submission
//!
//! The submitter issues exactly one start request per call. Validation
//! happens before any network interaction; a spec with no columns or no
//! path/table reference never reaches the wire.

use crate::api::{ApiClient, IngestRequest, IngestResponse};
use crate::error::{CliError, Result};
use chbridge_common::types::{ConnectionConfig, Direction};
use std::time::Instant;
use tracing::info;

/// Everything needed to start one transfer job
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub direction: Direction,
    pub connection: ConnectionConfig,
    pub table_name: String,
    pub selected_columns: Vec<String>,
    pub delimiter: String,
    /// Source file for imports, target file for exports
    pub file_path: String,
    /// Imports only: create the target table before starting
    pub create_table_first: bool,
}

impl JobSpec {
    /// Fail fast on specs that can never succeed. No request is issued
    /// when this returns an error.
    pub fn validate(&self) -> Result<()> {
        if self.selected_columns.is_empty() {
            return Err(CliError::validation(
                "at least one column must be selected",
            ));
        }
        if self.table_name.trim().is_empty() {
            return Err(CliError::validation("a table name is required"));
        }
        if self.file_path.trim().is_empty() {
            return Err(CliError::validation("a file path is required"));
        }
        Ok(())
    }

    /// Table name with any database prefix stripped; the service expects
    /// the bare name and qualifies it with the connection's database.
    pub fn clean_table_name(&self) -> &str {
        match self.table_name.rsplit_once('.') {
            Some((_, bare)) => bare,
            None => &self.table_name,
        }
    }

    /// Build the wire request for this spec
    pub fn to_ingest_request(&self) -> IngestRequest {
        IngestRequest::new(
            self.direction,
            self.connection.clone(),
            self.clean_table_name().to_string(),
            self.selected_columns.clone(),
            self.delimiter.clone(),
            self.file_path.clone(),
        )
    }
}

/// Result of a submission attempt
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Async mode: the job is running and must be polled
    Accepted { operation_id: String },

    /// Sync/fallback mode: the service answered with a final result
    /// (or with nothing at all)
    Immediate { result: Option<IngestResponse> },

    /// The service rejected the start request or could not be reached
    SubmitFailed { message: String },
}

/// Phase of an operation's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationPhase {
    #[default]
    Idle,
    Submitting,
    Polling,
    Terminal,
}

/// One in-flight transfer, tracked end to end
#[derive(Debug)]
pub struct Operation {
    /// Present only in async mode
    pub id: Option<String>,
    pub direction: Direction,
    pub started_at: Instant,
    phase: OperationPhase,
}

impl Operation {
    pub fn new(direction: Direction) -> Self {
        Self {
            id: None,
            direction,
            started_at: Instant::now(),
            phase: OperationPhase::Idle,
        }
    }

    pub fn phase(&self) -> OperationPhase {
        self.phase
    }

    /// Advance the lifecycle. Terminal is absorbing: once reached, no
    /// transition leaves it.
    pub fn advance(&mut self, next: OperationPhase) {
        if self.phase == OperationPhase::Terminal {
            return;
        }
        self.phase = next;
    }
}

/// Submit a job, issuing exactly one outbound request.
///
/// Retry policy, if any, belongs to the transport; this layer never
/// retries. Returns `Err` only for validation failures (before any
/// network interaction); transport and service failures are folded into
/// [`SubmitOutcome::SubmitFailed`] so the reconciler reports them.
pub async fn submit(client: &ApiClient, spec: &JobSpec) -> Result<SubmitOutcome> {
    spec.validate()?;

    info!(
        direction = %spec.direction,
        table = spec.clean_table_name(),
        columns = spec.selected_columns.len(),
        "Submitting transfer job"
    );

    match client.submit_ingest(&spec.to_ingest_request()).await {
        Ok(Some(response)) => match response.operation_id.clone() {
            Some(operation_id) if !operation_id.is_empty() => {
                Ok(SubmitOutcome::Accepted { operation_id })
            }
            _ => Ok(SubmitOutcome::Immediate {
                result: Some(response),
            }),
        },
        Ok(None) => Ok(SubmitOutcome::Immediate { result: None }),
        Err(e) => Ok(SubmitOutcome::SubmitFailed {
            message: format!("Failed to {} data: {}", spec.direction.verb(), e),
        }),
    }
}
