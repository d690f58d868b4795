//! Terminal outcome reconciliation
//!
//! Terminal signals can arrive from the submitter (rejection, synchronous
//! result) and from the poller (completed or errored samples), sometimes
//! more than once and sometimes contradicting each other. The reconciler
//! guarantees that exactly one [`FinalOutcome`] is emitted per operation:
//! the first terminal signal wins and everything after it is discarded
//! with a log line, never surfaced.

use crate::api::IngestResponse;
use crate::transfer::poller::StatusSample;
use tracing::debug;

/// Message fabricated when a terminal signal carries no payload at all
pub const MISSING_RESULT_MESSAGE: &str = "No result received from ingestion process";

/// Fallback message for job errors the service did not explain
pub const GENERIC_ERROR_MESSAGE: &str = "Ingestion process reported an error";

/// The single final result reported for an operation
#[derive(Debug, Clone, PartialEq)]
pub struct FinalOutcome {
    pub success: bool,

    /// "completed" or "error"; explicit service status verbatim when
    /// present, otherwise derived from the success flag
    pub status: String,

    pub message: Option<String>,

    pub records_processed: Option<u64>,

    pub execution_time_ms: Option<u64>,
}

/// A signal that may end the operation
#[derive(Debug, Clone)]
pub enum OutcomeSignal {
    /// The submitter could not start the job; terminal failure
    SubmitFailed { message: String },

    /// The submitter got a synchronous result instead of an operation id;
    /// `None` means the service answered with no payload at all
    Immediate { result: Option<IngestResponse> },

    /// A poll sample; only terminal classifications end the operation
    Sample(StatusSample),
}

/// Guarantees exactly one terminal notification per operation
#[derive(Debug, Default)]
pub struct OutcomeReconciler {
    emitted: bool,
}

impl OutcomeReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a terminal outcome has been emitted
    pub fn emitted(&self) -> bool {
        self.emitted
    }

    /// Observe a signal; returns the final outcome if this signal ends the
    /// operation and nothing has been emitted before.
    ///
    /// The first terminal signal wins. Later signals, terminal or not,
    /// even contradictory ones (a late "completed" after an emitted error),
    /// are discarded silently.
    pub fn observe(&mut self, signal: OutcomeSignal) -> Option<FinalOutcome> {
        if self.emitted {
            debug!(?signal, "Discarding signal after terminal outcome");
            return None;
        }

        let outcome = match signal {
            OutcomeSignal::SubmitFailed { message } => Some(FinalOutcome {
                success: false,
                status: "error".to_string(),
                message: Some(message),
                records_processed: None,
                execution_time_ms: None,
            }),

            OutcomeSignal::Immediate { result: None } => Some(FinalOutcome {
                success: false,
                status: "error".to_string(),
                message: Some(MISSING_RESULT_MESSAGE.to_string()),
                records_processed: None,
                execution_time_ms: None,
            }),

            OutcomeSignal::Immediate { result: Some(result) } => Some(Self::resolve(
                result.status,
                result.success,
                result.message,
                result.records_processed,
                result.execution_time_ms,
            )),

            OutcomeSignal::Sample(sample) => {
                if sample.classification.is_terminal() {
                    Some(Self::resolve(
                        sample.status,
                        sample.success,
                        sample.message,
                        sample.records_processed,
                        sample.execution_time_ms,
                    ))
                } else {
                    None
                }
            }
        };

        if outcome.is_some() {
            self.emitted = true;
        }
        outcome
    }

    /// Resolve a terminal payload into an outcome.
    ///
    /// Status precedence is intentional, matching observed service
    /// behavior: an explicit `status` field is used verbatim; only when it
    /// is absent is the status derived from the `success` flag.
    fn resolve(
        status: Option<String>,
        success: Option<bool>,
        message: Option<String>,
        records_processed: Option<u64>,
        execution_time_ms: Option<u64>,
    ) -> FinalOutcome {
        let status = match status {
            Some(explicit) => explicit,
            None => match success {
                Some(true) => "completed".to_string(),
                _ => "error".to_string(),
            },
        };

        let success = success.unwrap_or(status == "completed");

        let message = if success {
            message
        } else {
            message.or_else(|| Some(GENERIC_ERROR_MESSAGE.to_string()))
        };

        FinalOutcome {
            success,
            status,
            message,
            records_processed,
            execution_time_ms,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::api::IngestStatus;

    fn sample(status: &str) -> StatusSample {
        StatusSample::classify(IngestStatus {
            status: Some(status.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_first_terminal_signal_wins() {
        let mut reconciler = OutcomeReconciler::new();

        let outcome = reconciler.observe(OutcomeSignal::Sample(sample("completed")));
        assert!(outcome.is_some());
        assert!(outcome.unwrap().success);
        assert!(reconciler.emitted());

        // A late, contradictory error is discarded.
        let late = reconciler.observe(OutcomeSignal::Sample(sample("error")));
        assert!(late.is_none());
    }

    #[test]
    fn test_late_progress_after_terminal_is_discarded() {
        let mut reconciler = OutcomeReconciler::new();

        reconciler
            .observe(OutcomeSignal::Sample(sample("completed")))
            .unwrap();

        // Scenario: a stale "running" sample races in after completion.
        assert!(reconciler
            .observe(OutcomeSignal::Sample(sample("running")))
            .is_none());
    }

    #[test]
    fn test_progressing_samples_do_not_emit() {
        let mut reconciler = OutcomeReconciler::new();

        assert!(reconciler
            .observe(OutcomeSignal::Sample(sample("running")))
            .is_none());
        assert!(!reconciler.emitted());

        // Still emits later.
        assert!(reconciler
            .observe(OutcomeSignal::Sample(sample("completed")))
            .is_some());
    }

    #[test]
    fn test_explicit_status_takes_priority_over_success_flag() {
        // Intentional precedence: the service once reported status "error"
        // alongside success=true; the explicit status wins verbatim.
        let mut reconciler = OutcomeReconciler::new();
        let response = IngestResponse {
            status: Some("error".to_string()),
            success: Some(true),
            ..Default::default()
        };

        let outcome = reconciler
            .observe(OutcomeSignal::Immediate {
                result: Some(response),
            })
            .unwrap();
        assert_eq!(outcome.status, "error");
        // The explicit success flag is also used verbatim.
        assert!(outcome.success);
    }

    #[test]
    fn test_status_derived_from_success_flag_when_absent() {
        let mut reconciler = OutcomeReconciler::new();
        let response = IngestResponse {
            success: Some(true),
            records_processed: Some(500),
            ..Default::default()
        };

        let outcome = reconciler
            .observe(OutcomeSignal::Immediate {
                result: Some(response),
            })
            .unwrap();
        assert_eq!(outcome.status, "completed");
        assert!(outcome.success);
        assert_eq!(outcome.records_processed, Some(500));
    }

    #[test]
    fn test_missing_result_is_fabricated() {
        let mut reconciler = OutcomeReconciler::new();

        let outcome = reconciler
            .observe(OutcomeSignal::Immediate { result: None })
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some(MISSING_RESULT_MESSAGE));
    }

    #[test]
    fn test_submit_failed_is_terminal() {
        let mut reconciler = OutcomeReconciler::new();

        let outcome = reconciler
            .observe(OutcomeSignal::SubmitFailed {
                message: "Failed to export data: connection refused".to_string(),
            })
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.status, "error");

        assert!(reconciler
            .observe(OutcomeSignal::Sample(sample("completed")))
            .is_none());
    }

    #[test]
    fn test_error_without_message_gets_generic_fallback() {
        let mut reconciler = OutcomeReconciler::new();

        let outcome = reconciler
            .observe(OutcomeSignal::Sample(sample("error")))
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some(GENERIC_ERROR_MESSAGE));
    }

    #[test]
    fn test_exactly_one_outcome_across_many_terminal_signals() {
        let mut reconciler = OutcomeReconciler::new();

        let signals = vec![
            OutcomeSignal::Sample(sample("error")),
            OutcomeSignal::Sample(sample("completed")),
            OutcomeSignal::SubmitFailed {
                message: "late".to_string(),
            },
            OutcomeSignal::Immediate { result: None },
        ];

        let emitted: Vec<_> = signals
            .into_iter()
            .filter_map(|s| reconciler.observe(s))
            .collect();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].status, "error");
    }
}
