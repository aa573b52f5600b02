// Shared test helpers for pipeline tests.
//
// Provides an in-memory resolver so pipeline tests never depend on live DNS.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use cf_check::{HostResolver, LineSink, ResolutionError};

/// Resolver backed by a fixed name -> addresses map.
#[derive(Default)]
pub struct MapResolver {
    records: HashMap<String, Vec<IpAddr>>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, host: &str, addrs: &[&str]) -> Self {
        let addrs = addrs
            .iter()
            .map(|a| a.parse().expect("Failed to parse test address"))
            .collect();
        self.records.insert(host.to_string(), addrs);
        self
    }
}

#[async_trait]
impl HostResolver for MapResolver {
    async fn resolve_first(&self, host: &str) -> Result<IpAddr, ResolutionError> {
        self.records
            .get(host)
            .and_then(|addrs| addrs.first().copied())
            .ok_or(ResolutionError::NoAddresses)
    }
}

/// Takes the collected output back out of a sink once all jobs are done.
#[allow(dead_code)] // Used by other test files
pub fn sink_lines(sink: Arc<LineSink<Vec<u8>>>) -> Vec<String> {
    let sink = Arc::try_unwrap(sink)
        .ok()
        .expect("Sink still shared after the pool finished");
    String::from_utf8(sink.into_inner())
        .expect("Output should be UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}
