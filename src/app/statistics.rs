//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{OutcomeType, ProcessingStats};

/// Logs the per-outcome counters of a finished run.
pub fn print_outcome_statistics(stats: &ProcessingStats, elapsed_seconds: f64) {
    info!(
        "Checked {} hosts in {:.1}s",
        stats.submitted(),
        elapsed_seconds
    );
    for outcome in OutcomeType::iter() {
        let count = stats.get_count(outcome);
        if count > 0 {
            info!("   {}: {}", outcome.as_str(), count);
        }
    }
}
