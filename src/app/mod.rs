//! Main application modules.
//!
//! This module provides progress logging, shutdown handling and statistics
//! printing used by the filter run.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use statistics::print_outcome_statistics;
