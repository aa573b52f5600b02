//! In-memory resolver for deterministic tests.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::HostResolver;
use crate::error_handling::ResolutionError;

/// Resolves from a fixed map; unknown names fail with `NoAddresses`.
#[derive(Default)]
pub struct StaticResolver {
    records: HashMap<String, Vec<IpAddr>>,
    delay: Option<Duration>,
    lookups: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, host: &str, addrs: &[&str]) -> Self {
        let addrs = addrs
            .iter()
            .map(|a| a.parse().expect("test address should parse"))
            .collect();
        self.records.insert(host.to_string(), addrs);
        self
    }

    /// Makes every lookup sleep first, to keep jobs in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Highest number of lookups that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn resolve_first(&self, host: &str) -> Result<IpAddr, ResolutionError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.records
            .get(host)
            .and_then(|addrs| addrs.first().copied())
            .ok_or(ResolutionError::NoAddresses)
    }
}
