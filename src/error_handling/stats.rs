//! Processing statistics tracking.
//!
//! Thread-safe per-outcome counters shared by every job in a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::OutcomeType;

/// Thread-safe processing statistics tracker.
///
/// Tracks job outcomes using atomic counters, allowing concurrent access from
/// multiple tasks. All outcome types are initialized to zero on creation.
pub struct ProcessingStats {
    submitted: AtomicUsize,
    outcomes: HashMap<OutcomeType, AtomicUsize>,
}

impl ProcessingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut outcomes = HashMap::new();
        for outcome in OutcomeType::iter() {
            outcomes.insert(outcome, AtomicUsize::new(0));
        }

        ProcessingStats {
            submitted: AtomicUsize::new(0),
            outcomes,
        }
    }

    /// Record that a hostname was handed to a worker.
    pub fn increment_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment an outcome counter.
    pub fn increment(&self, outcome: OutcomeType) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment outcome counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                outcome
            );
        }
    }

    /// Number of hostnames handed to workers so far.
    pub fn submitted(&self) -> usize {
        self.submitted.load(Ordering::SeqCst)
    }

    /// Get the count for an outcome type.
    ///
    /// Returns 0 if the outcome type is not in the map (should never happen if properly initialized).
    pub fn get_count(&self, outcome: OutcomeType) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Number of jobs that reached any outcome.
    pub fn completed(&self) -> usize {
        OutcomeType::iter().map(|o| self.get_count(o)).sum()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
