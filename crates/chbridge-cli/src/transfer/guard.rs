//! Lifecycle guard for asynchronous callbacks
//!
//! A transfer is observed through timer callbacks that may still be in
//! flight when the observing side goes away or when a new operation
//! supersedes the current one. The guard carries an atomic generation
//! counter: every operation captures the generation at start time, and a
//! callback is only honored while its captured generation is still the
//! active one and the guard has not been torn down. This identity check is
//! the substitute for a lock; there is no parallelism to guard against,
//! only staleness.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Guard owning the active-operation generation
#[derive(Debug, Clone)]
pub struct LifecycleGuard {
    generation: Arc<AtomicU64>,
    alive: Arc<AtomicBool>,
}

impl LifecycleGuard {
    pub fn new() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Begin a new operation, superseding any previous one.
    ///
    /// All handles captured before this call stop being current, so stale
    /// timers from the old operation become no-ops.
    pub fn begin(&self) -> GuardHandle {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        GuardHandle {
            generation,
            current: Arc::clone(&self.generation),
            alive: Arc::clone(&self.alive),
        }
    }

    /// Tear down the guard: every handle, current or stale, goes dead.
    /// Idempotent.
    pub fn teardown(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

impl Default for LifecycleGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle captured at operation start
#[derive(Debug, Clone)]
pub struct GuardHandle {
    generation: u64,
    current: Arc<AtomicU64>,
    alive: Arc<AtomicBool>,
}

impl GuardHandle {
    /// True while this handle's operation is still the active one and the
    /// guard has not been torn down. Checked before every timer callback.
    pub fn is_current(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
            && self.generation == self.current.load(Ordering::SeqCst)
    }

    /// Generation captured when the operation began
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
