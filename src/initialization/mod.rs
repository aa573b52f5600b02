//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - DNS resolver
//! - Range table and membership index

mod logger;
mod resolver;

use std::sync::Arc;

use log::info;

use crate::config::{Config, EMBEDDED_RANGES_LABEL};
use crate::error_handling::InitializationError;
use crate::ranges::{RangeIndex, RangeTable};

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Loads the configured range table and builds the membership index.
///
/// Uses the `--ranges` file when given, otherwise the embedded Cloudflare table.
///
/// # Errors
///
/// Returns `InitializationError::RangeTableReadError` if an explicitly
/// configured file cannot be read. Malformed entries are skipped, not errors.
pub fn init_range_index(config: &Config) -> Result<Arc<RangeIndex>, InitializationError> {
    let (table, source) = match config.ranges.as_deref() {
        Some(path) => (RangeTable::from_file(path)?, path.display().to_string()),
        None => (RangeTable::embedded(), EMBEDDED_RANGES_LABEL.to_string()),
    };

    let index = RangeIndex::from_table(&table);
    info!(
        "Loaded {} ranges from {} ({} skipped, {} IPv4 / {} IPv6 intervals after merging)",
        table.len(),
        source,
        table.skipped().len(),
        index.v4_intervals(),
        index.v6_intervals()
    );
    if table.is_empty() {
        log::warn!("Range table {source} has no usable entries; every resolved host will be printed");
    }

    Ok(Arc::new(index))
}
