//! Configuration constants.
//!
//! Defaults for concurrency, DNS timeouts and progress logging.

use std::time::Duration;

/// Default number of concurrent resolution jobs.
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Interval between progress log lines while jobs are running.
pub const LOGGING_INTERVAL: Duration = Duration::from_secs(5);

// Network operation timeouts
/// DNS query timeout in seconds
/// Most lookups finish well under a second; 3s fails fast on dead upstreams
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Number of attempts per DNS query before the lookup is reported as failed
pub const DNS_ATTEMPTS: usize = 2;

/// Input path that selects stdin.
pub const STDIN_PATH: &str = "-";

/// Embedded Cloudflare range table used when no `--ranges` file is given.
pub const EMBEDDED_RANGES: &str = include_str!("../../data/cloudflare-ranges.txt");

/// Label used in logs for the embedded range table.
pub const EMBEDDED_RANGES_LABEL: &str = "embedded cloudflare table";
