//! Range table loading.
//!
//! A range table is plain text with one CIDR per line. Blank lines and lines
//! starting with `#` are ignored. Every entry is parsed on its own, so one bad
//! line never costs the rest of the table.

use std::path::Path;
use std::str::FromStr;

use ipnetwork::IpNetwork;
use log::{debug, warn};

use crate::config::{EMBEDDED_RANGES, EMBEDDED_RANGES_LABEL};
use crate::error_handling::{InitializationError, RangeParseError};

/// Parsed range table plus the entries that had to be skipped.
#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    ranges: Vec<IpNetwork>,
    skipped: Vec<RangeParseError>,
}

impl RangeTable {
    /// Parses a range table from text.
    ///
    /// Never fails as a whole: malformed entries are recorded in
    /// [`RangeTable::skipped`] and left out of [`RangeTable::ranges`].
    pub fn parse(source: &str) -> Self {
        let mut table = RangeTable::default();

        for (idx, line) in source.lines().enumerate() {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }

            match IpNetwork::from_str(entry) {
                Ok(network) => table.ranges.push(network),
                Err(e) => table.skipped.push(RangeParseError {
                    line: idx + 1,
                    entry: entry.to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        table
    }

    /// The Cloudflare table compiled into the binary.
    ///
    /// Skipped entries are logged at debug level; the upstream list has one
    /// known-broken entry.
    pub fn embedded() -> Self {
        let table = Self::parse(EMBEDDED_RANGES);
        for err in &table.skipped {
            debug!("Skipping range table entry, {err}");
        }
        debug!(
            "Loaded {} ranges from {} ({} skipped)",
            table.len(),
            EMBEDDED_RANGES_LABEL,
            table.skipped.len()
        );
        table
    }

    /// Reads and parses a range table file.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::RangeTableReadError` if the file cannot be
    /// read. Entry syntax errors are not errors here; see [`RangeTable::parse`].
    pub fn from_file(path: &Path) -> Result<Self, InitializationError> {
        let source = std::fs::read_to_string(path).map_err(|source| {
            InitializationError::RangeTableReadError {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let table = Self::parse(&source);
        for err in &table.skipped {
            warn!("Skipping range table entry in {}, {err}", path.display());
        }
        debug!(
            "Loaded {} ranges from {} ({} skipped)",
            table.len(),
            path.display(),
            table.skipped.len()
        );
        Ok(table)
    }

    /// Successfully parsed ranges, in table order.
    pub fn ranges(&self) -> &[IpNetwork] {
        &self.ranges
    }

    /// Entries that failed to parse.
    pub fn skipped(&self) -> &[RangeParseError] {
        &self.skipped
    }

    /// Number of parsed ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True if no entry parsed.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
