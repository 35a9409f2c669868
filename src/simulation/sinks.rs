//! Observation seams for batch progress and incremental trajectory samples
//!
//! The simulation core never renders or prints; it notifies these traits.
//! Progress sinks must be shareable across the parallel particle loop and
//! must not mutate simulation state.

use crate::physics::math::Scalar;
use crate::simulation::particle::TrajectorySample;
use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Receives one tick per completed particle during a batch solve.
pub trait ProgressSink: Send + Sync {
    fn tick(&self);

    fn finish(&self) {}
}

/// Progress sink that logs percentage milestones.
pub struct LogProgress {
    total: usize,
    completed: AtomicUsize,
    /// Log every `stride` completions
    stride: usize,
}

impl LogProgress {
    pub fn new(total: usize) -> Self {
        // ~10 lines per run, at least one per particle for tiny ensembles
        let stride = (total / 10).max(1);
        Self {
            total,
            completed: AtomicUsize::new(0),
            stride,
        }
    }
}

impl ProgressSink for LogProgress {
    fn tick(&self) {
        let done = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if done % self.stride == 0 || done == self.total {
            info!(
                "solved {done}/{} particles ({:.0}%)",
                self.total,
                100.0 * done as f64 / self.total as f64
            );
        }
    }

    fn finish(&self) {
        info!("batch solve complete");
    }
}

/// Progress sink that ignores all notifications.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn tick(&self) {}
}

/// Receives per-step samples in incremental mode, plus a completion
/// notification carrying the detector flag for histogram-style reporting.
pub trait TrajectorySink {
    /// A new sample was written for `particle` at step index `n`.
    fn sample(&mut self, particle: usize, n: usize, sample: &TrajectorySample, t: Scalar);

    /// `particle` reached a terminal state (or exhausted its budget).
    fn finished(&mut self, _particle: usize, _hit_detector: bool, _final_time: Scalar) {}
}
