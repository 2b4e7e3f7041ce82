//! # Training Progress

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// A shared, monotonically increasing count of completed merge steps.
///
/// Clones share the same counter; so a clone can be polled
/// from another thread while training runs.
#[derive(Debug, Clone, Default)]
pub struct TrainingProgress(Arc<AtomicUsize>);

impl TrainingProgress {
    /// Create a new counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of merge steps completed so far.
    pub fn merges_done(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    /// Record one completed merge step; returns the new count.
    pub(crate) fn increment(&self) -> usize {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }
}
