//! Error type definitions.
//!
//! This module defines the error types and outcome categories used throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
///
/// Any of these stops the run before a single hostname is read.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// The range table file could not be read.
    #[error("Failed to read range table {}: {source}", .path.display())]
    RangeTableReadError {
        /// Path that was given with `--ranges`
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The worker pool cannot be started with the requested size.
    #[error(
        "Invalid concurrency {0}: must be between 1 and {max}",
        max = tokio::sync::Semaphore::MAX_PERMITS
    )]
    InvalidConcurrencyError(usize),
}

/// A single range-table entry that failed to parse.
///
/// These never abort a table load; they are collected and reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: invalid range {entry:?}: {reason}")]
pub struct RangeParseError {
    /// 1-based line number in the table source
    pub line: usize,
    /// Entry text after trimming
    pub entry: String,
    /// Parser message
    pub reason: String,
}

/// Error returned when a hostname cannot be turned into an address.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The resolver reported an error (NXDOMAIN, timeout, malformed name, ...).
    #[error("DNS lookup failed: {0}")]
    Lookup(#[from] hickory_resolver::error::ResolveError),

    /// The lookup succeeded but carried no addresses.
    #[error("No IP addresses found")]
    NoAddresses,
}

/// Outcome of one job, used for end-of-run counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum OutcomeType {
    /// Resolved outside every range and written to the output
    Emitted,
    /// Resolved into a configured range and suppressed
    BehindProvider,
    /// Name did not resolve; dropped
    ResolutionFailed,
    /// Resolved outside every range but the output write failed
    WriteFailed,
}

impl OutcomeType {
    /// Human-readable label for summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeType::Emitted => "Emitted",
            OutcomeType::BehindProvider => "Behind provider",
            OutcomeType::ResolutionFailed => "Resolution failed",
            OutcomeType::WriteFailed => "Output write failed",
        }
    }
}
