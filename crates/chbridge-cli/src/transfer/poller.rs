//! Status polling loop for in-flight operations
//!
//! Queries the ingestion service on a fixed cadence, classifies each
//! response, and tracks consecutive read failures. One status request is in
//! flight at a time: the request is awaited before the next tick, so a
//! terminal sample can never be followed by an out-of-order progress
//! sample. After five consecutive failures the poller gives up and
//! synthesizes a lost-connection error sample.

use crate::api::{ApiClient, IngestStatus};
use crate::transfer::guard::GuardHandle;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, warn};

// ============================================================================
// Polling Constants
// ============================================================================

/// Default status-poll cadence.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Consecutive failures tolerated before the operation is declared lost.
/// With the default cadence this is roughly five seconds of unreachability.
pub const MAX_CONSECUTIVE_POLL_FAILURES: u32 = 5;

/// Classification of one status sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClassification {
    /// The job is still running
    Progressing,
    /// The job finished successfully
    Completed,
    /// The job failed
    Errored,
    /// The service answered but the payload carried no usable status
    Unreadable,
}

impl StatusClassification {
    /// Completed and Errored end the operation; no further samples follow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusClassification::Completed | StatusClassification::Errored)
    }
}

/// One classified poll response
#[derive(Debug, Clone)]
pub struct StatusSample {
    pub classification: StatusClassification,

    /// Raw status string from the service, verbatim
    pub status: Option<String>,

    pub success: Option<bool>,

    pub records_processed: Option<u64>,

    /// True total when known, otherwise the service's estimate
    pub total_records: Option<u64>,

    pub records_per_second: Option<f64>,

    pub message: Option<String>,

    pub execution_time_ms: Option<u64>,
}

impl StatusSample {
    /// Classify a decoded status payload.
    ///
    /// `"completed"` and `"error"` are terminal; every other status string
    /// (including none at all) counts as progressing. The true total wins
    /// over the estimate when both are present.
    pub fn classify(payload: IngestStatus) -> Self {
        let classification = match payload.status.as_deref() {
            Some("completed") => StatusClassification::Completed,
            Some("error") => StatusClassification::Errored,
            _ => StatusClassification::Progressing,
        };

        Self {
            classification,
            status: payload.status,
            success: payload.success,
            records_processed: payload.records_processed,
            total_records: payload.total_records.or(payload.estimated_total),
            records_per_second: payload.records_per_second,
            message: payload.message,
            execution_time_ms: payload.execution_time_ms,
        }
    }

    /// Sample for a response that carried no payload at all
    pub fn unreadable() -> Self {
        Self {
            classification: StatusClassification::Unreadable,
            status: None,
            success: None,
            records_processed: None,
            total_records: None,
            records_per_second: None,
            message: None,
            execution_time_ms: None,
        }
    }

    /// Synthesized terminal error after too many consecutive poll failures
    pub fn lost_connection(detail: &str) -> Self {
        Self {
            classification: StatusClassification::Errored,
            status: Some("error".to_string()),
            success: Some(false),
            records_processed: None,
            total_records: None,
            records_per_second: None,
            message: Some(format!("Lost connection to ingestion process: {}", detail)),
            execution_time_ms: None,
        }
    }
}

/// Poller configuration
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Cadence between status queries
    pub interval: Duration,

    /// Consecutive failures tolerated before escalation
    pub max_consecutive_failures: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_consecutive_failures: MAX_CONSECUTIVE_POLL_FAILURES,
        }
    }
}

/// Handle for stopping a poller from outside the loop
///
/// `stop` is idempotent and safe to call after the loop already ended.
#[derive(Debug, Clone)]
pub struct PollerHandle {
    cancel: Arc<AtomicBool>,
}

impl PollerHandle {
    pub fn stop(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

/// Fixed-cadence status poller for one operation
pub struct StatusPoller {
    client: Arc<ApiClient>,
    config: PollerConfig,
    cancel: Arc<AtomicBool>,
}

impl StatusPoller {
    pub fn new(client: Arc<ApiClient>, config: PollerConfig) -> Self {
        Self {
            client,
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for external cancellation
    pub fn handle(&self) -> PollerHandle {
        PollerHandle {
            cancel: Arc::clone(&self.cancel),
        }
    }

    /// Poll `operation_id` until a terminal sample, escalation, or stop.
    ///
    /// `on_sample` is called for every delivered sample, terminal ones
    /// included; after a terminal sample no further callbacks occur. The
    /// guard handle is checked before every callback so a superseded or
    /// torn-down operation receives nothing. Transport failures deliver no
    /// sample; the consecutive-failure counter is owned by this call and
    /// thus starts at zero for every new operation.
    pub async fn run<F>(&self, guard: &GuardHandle, operation_id: &str, mut on_sample: F)
    where
        F: FnMut(StatusSample),
    {
        let mut failures: u32 = 0;
        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first interval tick fires immediately; consume it so the
        // first query happens one cadence after polling starts.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            if self.cancel.load(Ordering::SeqCst) || !guard.is_current() {
                debug!(operation_id, "Polling stopped");
                break;
            }

            match self.client.poll_status(operation_id).await {
                Ok(Some(payload)) => {
                    // Any successfully read sample forgives prior failures.
                    failures = 0;

                    let sample = StatusSample::classify(payload);
                    let terminal = sample.classification.is_terminal();
                    debug!(
                        operation_id,
                        classification = ?sample.classification,
                        records = ?sample.records_processed,
                        "Poll sample"
                    );

                    if !guard.is_current() {
                        break;
                    }
                    on_sample(sample);

                    if terminal {
                        self.cancel.store(true, Ordering::SeqCst);
                        break;
                    }
                }
                Ok(None) => {
                    failures += 1;
                    warn!(operation_id, failures, "Status poll returned no data");

                    if !guard.is_current() {
                        break;
                    }

                    if failures > self.config.max_consecutive_failures {
                        on_sample(StatusSample::lost_connection(
                            "status endpoint returned no data",
                        ));
                        self.cancel.store(true, Ordering::SeqCst);
                        break;
                    }
                    on_sample(StatusSample::unreadable());
                }
                Err(e) => {
                    failures += 1;
                    error!(operation_id, failures, error = %e, "Status poll failed");

                    if !guard.is_current() {
                        break;
                    }

                    if failures > self.config.max_consecutive_failures {
                        on_sample(StatusSample::lost_connection(&e.to_string()));
                        self.cancel.store(true, Ordering::SeqCst);
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn payload(status: &str) -> IngestStatus {
        IngestStatus {
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_terminal_statuses() {
        let sample = StatusSample::classify(payload("completed"));
        assert_eq!(sample.classification, StatusClassification::Completed);
        assert!(sample.classification.is_terminal());

        let sample = StatusSample::classify(payload("error"));
        assert_eq!(sample.classification, StatusClassification::Errored);
        assert!(sample.classification.is_terminal());
    }

    #[test]
    fn test_classify_anything_else_is_progressing() {
        for status in ["running", "starting", "weird"] {
            let sample = StatusSample::classify(payload(status));
            assert_eq!(sample.classification, StatusClassification::Progressing);
            assert!(!sample.classification.is_terminal());
        }

        let sample = StatusSample::classify(IngestStatus::default());
        assert_eq!(sample.classification, StatusClassification::Progressing);
    }

    #[test]
    fn test_classify_folds_estimated_total() {
        let sample = StatusSample::classify(IngestStatus {
            status: Some("running".to_string()),
            estimated_total: Some(500),
            ..Default::default()
        });
        assert_eq!(sample.total_records, Some(500));

        // True total wins over the estimate
        let sample = StatusSample::classify(IngestStatus {
            status: Some("running".to_string()),
            total_records: Some(1000),
            estimated_total: Some(500),
            ..Default::default()
        });
        assert_eq!(sample.total_records, Some(1000));
    }

    #[test]
    fn test_lost_connection_sample() {
        let sample = StatusSample::lost_connection("connection refused");
        assert_eq!(sample.classification, StatusClassification::Errored);
        assert_eq!(sample.success, Some(false));
        assert!(sample
            .message
            .as_deref()
            .unwrap()
            .starts_with("Lost connection to ingestion process"));
    }

    #[test]
    fn test_poller_handle_stop_is_idempotent() {
        let client = Arc::new(ApiClient::new("http://localhost:1".to_string()).unwrap());
        let poller = StatusPoller::new(client, PollerConfig::default());
        let handle = poller.handle();

        assert!(!handle.is_stopped());
        handle.stop();
        assert!(handle.is_stopped());
        handle.stop();
        assert!(handle.is_stopped());
    }
}
