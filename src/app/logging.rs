//! Progress logging utilities.

use log::info;

use crate::error_handling::ProcessingStats;

/// Logs progress information about hostname processing.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `stats` - Live counters of the running pool
pub fn log_progress(start_time: std::time::Instant, stats: &ProcessingStats) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = stats.completed();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} hosts in {:.2} seconds (~{:.2} hosts/sec)",
        completed,
        stats.submitted(),
        elapsed_secs,
        rate
    );
}
