//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use log::warn;

/// Initializes the DNS resolver for hostname lookups.
///
/// Uses the system configuration (`/etc/resolv.conf` and the hosts file) so
/// results match what other tools on the machine see. If the system
/// configuration cannot be read, falls back to hickory's default upstreams.
///
/// Timeouts are configured to prevent hanging on slow or unresponsive DNS servers.
///
/// # Arguments
///
/// * `timeout_secs` - Per-query timeout
/// * `attempts` - Attempts per query before giving up
pub fn init_resolver(timeout_secs: u64, attempts: usize) -> Arc<TokioAsyncResolver> {
    let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            warn!("Failed to read system DNS configuration: {e}. Using default upstreams.");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };

    apply_timeouts(&mut opts, timeout_secs, attempts);

    Arc::new(TokioAsyncResolver::tokio(config, opts))
}

fn apply_timeouts(opts: &mut ResolverOpts, timeout_secs: u64, attempts: usize) {
    opts.timeout = Duration::from_secs(timeout_secs);
    opts.attempts = attempts;
    // Names are looked up as given; no search-domain appending
    opts.ndots = 0;
}
