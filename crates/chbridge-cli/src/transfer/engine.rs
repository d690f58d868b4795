//! Transfer engine: orchestrates one operation end to end
//!
//! Wires the submitter, poller, estimator, and reconciler together:
//! validate → optional create-table pre-step → submit → poll → progress →
//! single terminal outcome. The caller observes everything through one
//! event callback carrying either an intermediate progress state or the
//! final outcome; rendering stays outside this module.

use crate::api::{ApiClient, CreateTableRequest};
use crate::error::{CliError, Result};
use crate::transfer::guard::LifecycleGuard;
use crate::transfer::operation::{self, JobSpec, Operation, OperationPhase, SubmitOutcome};
use crate::transfer::poller::{PollerConfig, StatusPoller};
use crate::transfer::progress::{ProgressEstimator, ProgressState};
use crate::transfer::reconcile::{FinalOutcome, OutcomeReconciler, OutcomeSignal};
use chbridge_common::types::Direction;
use std::sync::Arc;
use tracing::{info, warn};

/// What the observing side receives while an operation runs
#[derive(Debug, Clone)]
pub enum TransferEvent {
    /// Intermediate progress; emitted once per delivered sample
    Progress(ProgressState),
    /// The single terminal notification for this operation
    Final(FinalOutcome),
}

/// Engine configuration
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub poll: PollerConfig,
}

/// Orchestrates transfer operations against one ingestion service
pub struct TransferEngine {
    client: Arc<ApiClient>,
    config: EngineConfig,
    guard: LifecycleGuard,
}

impl TransferEngine {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self::with_config(client, EngineConfig::default())
    }

    pub fn with_config(client: Arc<ApiClient>, config: EngineConfig) -> Self {
        Self {
            client,
            config,
            guard: LifecycleGuard::new(),
        }
    }

    /// The lifecycle guard; tear it down when the observing side goes away.
    pub fn guard(&self) -> &LifecycleGuard {
        &self.guard
    }

    /// Run one operation to its single terminal outcome.
    ///
    /// `on_event` receives a [`TransferEvent::Progress`] per status sample
    /// and exactly one [`TransferEvent::Final`]. Starting a new run
    /// supersedes any previous operation: its stale callbacks are dropped
    /// by the lifecycle guard. Returns `Err` for validation failures and
    /// for runs stopped before any terminal signal; job-level failures are
    /// reported through the returned outcome with `success: false`.
    pub async fn run<F>(&self, spec: &JobSpec, mut on_event: F) -> Result<FinalOutcome>
    where
        F: FnMut(TransferEvent),
    {
        spec.validate()?;

        let handle = self.guard.begin();
        let mut op = Operation::new(spec.direction);
        let mut estimator = ProgressEstimator::new();
        let mut reconciler = OutcomeReconciler::new();

        if spec.direction == Direction::Import && spec.create_table_first {
            self.create_table_pre_step(spec).await;
        }

        op.advance(OperationPhase::Submitting);

        match operation::submit(&self.client, spec).await? {
            SubmitOutcome::SubmitFailed { message } => {
                warn!(message, "Submission failed");
                op.advance(OperationPhase::Terminal);
                Self::emit_final(
                    &mut reconciler,
                    OutcomeSignal::SubmitFailed { message },
                    &mut on_event,
                )
            }

            SubmitOutcome::Immediate { result } => {
                info!("Service answered synchronously; no polling needed");
                op.advance(OperationPhase::Terminal);
                Self::emit_final(
                    &mut reconciler,
                    OutcomeSignal::Immediate { result },
                    &mut on_event,
                )
            }

            SubmitOutcome::Accepted { operation_id } => {
                info!(operation_id, "Job accepted; polling for status");
                op.id = Some(operation_id.clone());
                op.advance(OperationPhase::Polling);

                let poller = StatusPoller::new(Arc::clone(&self.client), self.config.poll.clone());
                let mut outcome: Option<FinalOutcome> = None;

                poller
                    .run(&handle, &operation_id, |sample| {
                        let state = estimator.update(&sample);
                        on_event(TransferEvent::Progress(state.clone()));

                        if let Some(out) = reconciler.observe(OutcomeSignal::Sample(sample)) {
                            on_event(TransferEvent::Final(out.clone()));
                            outcome = Some(out);
                        }
                    })
                    .await;

                op.advance(OperationPhase::Terminal);
                outcome.ok_or_else(|| {
                    CliError::cancelled("polling stopped before a terminal status arrived")
                })
            }
        }
    }

    /// Reconcile a terminal submission signal and emit the final event.
    fn emit_final<F>(
        reconciler: &mut OutcomeReconciler,
        signal: OutcomeSignal,
        on_event: &mut F,
    ) -> Result<FinalOutcome>
    where
        F: FnMut(TransferEvent),
    {
        match reconciler.observe(signal) {
            Some(outcome) => {
                on_event(TransferEvent::Final(outcome.clone()));
                Ok(outcome)
            }
            // A fresh reconciler always emits for a terminal signal; this
            // arm only guards against future misuse.
            None => Err(CliError::cancelled("terminal signal was not reconciled")),
        }
    }

    /// Import pre-step: try to create the target table. Failure is
    /// non-fatal; the import proceeds against a possibly existing table.
    async fn create_table_pre_step(&self, spec: &JobSpec) {
        let request = CreateTableRequest {
            connection: spec.connection.clone(),
            table_name: spec.clean_table_name().to_string(),
            columns: spec.selected_columns.clone(),
            source_file_path: spec.file_path.clone(),
        };

        match self.client.create_table(&request).await {
            Ok(response) if response.success => {
                info!(table = request.table_name, "Target table created");
            }
            Ok(response) => {
                warn!(
                    table = request.table_name,
                    message = ?response.message,
                    "Table creation refused; continuing with import"
                );
            }
            Err(e) => {
                warn!(
                    table = request.table_name,
                    error = %e,
                    "Table creation failed; continuing with import"
                );
            }
        }
    }
}
