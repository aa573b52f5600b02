//! Provider address ranges.
//!
//! This module provides:
//! - Range table loading from text (embedded asset or file), tolerant of bad entries
//! - A sorted-interval index for fast membership tests

mod index;
mod table;

// Re-export public API
pub use index::RangeIndex;
pub use table::RangeTable;

#[cfg(test)]
mod tests;
