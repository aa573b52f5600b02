//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, range parsing and resolution
//! - Per-outcome processing statistics shared across jobs

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{InitializationError, OutcomeType, RangeParseError, ResolutionError};
