//! Transfer orchestration engine
//!
//! Everything needed to start a bulk transfer job against the ingestion
//! service and observe it to its single terminal outcome:
//!
//! - [`operation`]: job specification, validation, submission
//! - [`poller`]: fixed-cadence status polling with failure escalation
//! - [`progress`]: monotonic progress estimation (real or simulated)
//! - [`reconcile`]: exactly-once terminal outcome reconciliation
//! - [`guard`]: staleness protection for timer callbacks
//! - [`engine`]: the orchestrator tying the above together

pub mod engine;
pub mod guard;
pub mod operation;
pub mod poller;
pub mod progress;
pub mod reconcile;

pub use engine::{EngineConfig, TransferEngine, TransferEvent};
pub use guard::{GuardHandle, LifecycleGuard};
pub use operation::{JobSpec, Operation, OperationPhase, SubmitOutcome};
pub use poller::{PollerConfig, PollerHandle, StatusClassification, StatusPoller, StatusSample};
pub use progress::{ProgressEstimator, ProgressMode, ProgressState, ProgressStats, RampStrategy, TaperedRamp};
pub use reconcile::{FinalOutcome, OutcomeReconciler, OutcomeSignal};
