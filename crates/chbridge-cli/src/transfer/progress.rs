//! Progress estimation for in-flight operations
//!
//! Converts poll samples into a monotonic, bounded progress percentage plus
//! a throughput snapshot. Real record counts are used when the service
//! reports a total; otherwise a capped synthetic ramp keeps the bar moving
//! without ever implying completion. The percentage only ever reaches 100
//! on a completed classification.

use crate::transfer::poller::{StatusClassification, StatusSample};

// ============================================================================
// Estimation Constants
// ============================================================================

/// Real progress is capped here until the job is actually completed.
pub const REAL_PROGRESS_CAP: f64 = 99.0;

/// Synthetic progress is capped here; it never implies completion.
pub const SIMULATED_PROGRESS_CAP: f64 = 95.0;

/// Where the progress percentage comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressMode {
    /// Computed from reported record counts
    #[default]
    Real,
    /// Synthetic ramp; the service reported no usable total
    Simulated,
}

/// Last known throughput snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressStats {
    pub processed: u64,
    /// Zero when the service reports no total
    pub total: u64,
    pub rate: f64,
}

/// Derived progress state, owned and mutated only by the estimator
#[derive(Debug, Clone, Default)]
pub struct ProgressState {
    /// Percentage in [0, 100]; non-decreasing, the forced move to 100 on
    /// completion being the only jump
    pub percent: f64,
    pub stats: Option<ProgressStats>,
    pub mode: ProgressMode,
}

/// Strategy for advancing synthetic progress
///
/// Pluggable so the ramp shape can be swapped without touching the
/// estimator or reconciliation logic.
pub trait RampStrategy: Send + Sync {
    /// Next percentage given the current one; must not decrease it
    fn next(&self, current: f64) -> f64;
}

/// Default ramp: fast at first, tapering as the bar fills.
///
/// +2 per tick below 50%, +1 below 80%, +0.5 above, capped at 95%.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaperedRamp;

impl RampStrategy for TaperedRamp {
    fn next(&self, current: f64) -> f64 {
        if current < 50.0 {
            current + 2.0
        } else if current < 80.0 {
            current + 1.0
        } else {
            (current + 0.5).min(SIMULATED_PROGRESS_CAP)
        }
    }
}

/// Converts poll samples into [`ProgressState`]
pub struct ProgressEstimator {
    state: ProgressState,
    ramp: Box<dyn RampStrategy>,
}

impl ProgressEstimator {
    pub fn new() -> Self {
        Self::with_ramp(Box::new(TaperedRamp))
    }

    /// Use a custom synthetic-progress strategy
    pub fn with_ramp(ramp: Box<dyn RampStrategy>) -> Self {
        Self {
            state: ProgressState::default(),
            ramp,
        }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Fold one sample into the progress state.
    ///
    /// - Known total: percent from real counts, capped at 99 until
    ///   completion, never decreasing.
    /// - No total while progressing: synthetic ramp, capped at 95.
    /// - Completed: forced to 100, last stats retained.
    /// - Errored/Unreadable: frozen at the last value.
    pub fn update(&mut self, sample: &StatusSample) -> &ProgressState {
        match sample.classification {
            StatusClassification::Completed => {
                self.state.percent = 100.0;
            }
            StatusClassification::Errored | StatusClassification::Unreadable => {
                // Freeze: keep the last percentage and stats.
            }
            StatusClassification::Progressing => {
                let total = sample.total_records.unwrap_or(0);
                // The service does not enforce processed <= total; clamp here.
                let processed = sample.records_processed.unwrap_or(0).min(if total > 0 {
                    total
                } else {
                    u64::MAX
                });

                self.state.stats = Some(ProgressStats {
                    processed,
                    total,
                    rate: sample.records_per_second.unwrap_or(0.0),
                });

                if total > 0 {
                    let real = ((processed as f64 / total as f64) * 100.0)
                        .round()
                        .min(REAL_PROGRESS_CAP);
                    self.state.percent = self.state.percent.max(real);
                    self.state.mode = ProgressMode::Real;
                } else {
                    let next = self.ramp.next(self.state.percent);
                    self.state.percent = self.state.percent.max(next);
                    self.state.mode = ProgressMode::Simulated;
                }
            }
        }

        &self.state
    }
}

impl Default for ProgressEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::api::IngestStatus;

    fn progressing(processed: u64, total: Option<u64>) -> StatusSample {
        StatusSample::classify(IngestStatus {
            status: Some("running".to_string()),
            records_processed: Some(processed),
            total_records: total,
            records_per_second: Some(120.0),
            ..Default::default()
        })
    }

    fn completed() -> StatusSample {
        StatusSample::classify(IngestStatus {
            status: Some("completed".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_real_progress_from_counts() {
        let mut estimator = ProgressEstimator::new();

        assert_eq!(estimator.update(&progressing(10, Some(100))).percent, 10.0);
        assert_eq!(estimator.update(&progressing(20, Some(100))).percent, 20.0);
        assert_eq!(estimator.update(&progressing(30, Some(100))).percent, 30.0);
        assert_eq!(estimator.state().mode, ProgressMode::Real);
    }

    #[test]
    fn test_real_progress_capped_at_99_until_completed() {
        let mut estimator = ProgressEstimator::new();

        let state = estimator.update(&progressing(1000, Some(1000)));
        assert_eq!(state.percent, 99.0, "must not show 100 prematurely");

        let state = estimator.update(&completed());
        assert_eq!(state.percent, 100.0);
    }

    #[test]
    fn test_real_progress_never_decreases() {
        let mut estimator = ProgressEstimator::new();

        estimator.update(&progressing(50, Some(100)));
        let state = estimator.update(&progressing(30, Some(100)));
        assert_eq!(state.percent, 50.0);
    }

    #[test]
    fn test_processed_clamped_to_total() {
        let mut estimator = ProgressEstimator::new();

        let state = estimator.update(&progressing(2000, Some(1000)));
        assert_eq!(state.percent, 99.0);
        assert_eq!(state.stats.unwrap().processed, 1000);
    }

    #[test]
    fn test_simulated_ramp_tapers_and_caps_at_95() {
        let mut estimator = ProgressEstimator::new();

        let state = estimator.update(&progressing(10, None));
        assert_eq!(state.percent, 2.0);
        assert_eq!(state.mode, ProgressMode::Simulated);

        for _ in 0..500 {
            estimator.update(&progressing(10, None));
        }
        assert!(estimator.state().percent <= SIMULATED_PROGRESS_CAP);
        assert_eq!(estimator.state().percent, SIMULATED_PROGRESS_CAP);
    }

    #[test]
    fn test_simulated_ramp_step_sizes() {
        let ramp = TaperedRamp;
        assert_eq!(ramp.next(10.0), 12.0);
        assert_eq!(ramp.next(49.0), 51.0);
        assert_eq!(ramp.next(60.0), 61.0);
        assert_eq!(ramp.next(90.0), 90.5);
        assert_eq!(ramp.next(94.8), 95.0);
    }

    #[test]
    fn test_zero_total_uses_simulated_mode() {
        let mut estimator = ProgressEstimator::new();
        let state = estimator.update(&progressing(10, Some(0)));
        assert_eq!(state.mode, ProgressMode::Simulated);
    }

    #[test]
    fn test_error_freezes_percent() {
        let mut estimator = ProgressEstimator::new();
        estimator.update(&progressing(40, Some(100)));

        let errored = StatusSample::classify(IngestStatus {
            status: Some("error".to_string()),
            ..Default::default()
        });
        let state = estimator.update(&errored);
        assert_eq!(state.percent, 40.0);

        let state = estimator.update(&StatusSample::unreadable());
        assert_eq!(state.percent, 40.0);
    }

    #[test]
    fn test_completed_retains_last_stats() {
        let mut estimator = ProgressEstimator::new();
        estimator.update(&progressing(500, Some(1000)));

        let state = estimator.update(&completed());
        assert_eq!(state.percent, 100.0);
        assert_eq!(state.stats.unwrap().processed, 500);
    }

    #[test]
    fn test_monotonic_over_arbitrary_sequences() {
        // Mixed real, simulated, unreadable, and error samples: the percent
        // must never decrease, terminal jump aside.
        let mut estimator = ProgressEstimator::new();
        let samples = vec![
            progressing(5, None),
            progressing(10, Some(100)),
            progressing(8, Some(100)),
            StatusSample::unreadable(),
            progressing(60, Some(100)),
            progressing(0, None),
            completed(),
        ];

        let mut last = 0.0;
        for sample in &samples {
            let percent = estimator.update(sample).percent;
            assert!(percent >= last, "percent regressed: {} -> {}", last, percent);
            last = percent;
        }
        assert_eq!(last, 100.0);
    }
}
