//! cf_check library: find hosts that are not behind Cloudflare.
//!
//! Reads hostnames, resolves each one, and writes out only those whose first
//! resolved address is outside every range of a provider's published address
//! list. The default list is Cloudflare's, embedded in the binary; any other
//! list can be loaded from a file.
//!
//! # Example
//!
//! ```no_run
//! use cf_check::{run_filter, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("subdomains.txt"),
//!     concurrency: 50,
//!     domain_mode: true,
//!     ..Default::default()
//! };
//!
//! let report = run_filter(config).await?;
//! eprintln!("{} of {} hosts are not behind the provider", report.emitted, report.total_hosts);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

mod app;
pub mod config;
mod dns;
mod error_handling;
pub mod initialization;
mod pool;
mod ranges;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputMode};
pub use dns::{resolve_host_to_ip, HostResolver};
pub use error_handling::{
    InitializationError, OutcomeType, ProcessingStats, RangeParseError, ResolutionError,
};
pub use pool::{LineSink, PoolReport, ResolverPool};
pub use ranges::{RangeIndex, RangeTable};
pub use run::{run_filter, run_filter_to, FilterReport};

// Internal run module (wires configuration, resolver, index and pool together)
mod run {
    use std::io::Write;
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use log::info;
    use tokio::io::{AsyncBufRead, BufReader};
    use tokio_util::sync::CancellationToken;

    use crate::app::{log_progress, print_outcome_statistics, shutdown_gracefully};
    use crate::config::{Config, LOGGING_INTERVAL};
    use crate::initialization::{init_range_index, init_resolver};
    use crate::pool::{LineSink, ResolverPool};

    /// Results of a filter run.
    #[derive(Debug, Clone)]
    pub struct FilterReport {
        /// Hostnames submitted for resolution
        pub total_hosts: usize,
        /// Hosts written to the output
        pub emitted: usize,
        /// Hosts that resolved into a configured range
        pub behind_provider: usize,
        /// Hosts that did not resolve
        pub resolution_failed: usize,
        /// Hosts whose output line could not be written
        pub write_failed: usize,
        /// Input read error that ended the run early, if any
        pub input_error: Option<String>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the filter and writes results to stdout.
    ///
    /// # Errors
    ///
    /// Fails before reading any input if the range table file, the input file
    /// or the worker pool cannot be set up. Per-host failures are never errors.
    pub async fn run_filter(config: Config) -> Result<FilterReport> {
        run_filter_to(config, Arc::new(LineSink::new(std::io::stdout()))).await
    }

    /// Runs the filter and writes results to `sink`.
    ///
    /// Same as [`run_filter`] but lets the caller choose the output.
    pub async fn run_filter_to<W>(config: Config, sink: Arc<LineSink<W>>) -> Result<FilterReport>
    where
        W: Write + Send + 'static,
    {
        let index = init_range_index(&config).context("Failed to load range table")?;
        let resolver = init_resolver(config.dns_timeout_seconds, config.dns_attempts);
        let pool = ResolverPool::new(resolver, index, config.output_mode(), config.concurrency)
            .context("Failed to start resolver pool")?;

        let input: Box<dyn AsyncBufRead + Unpin + Send> = if config.reads_stdin() {
            info!("Reading hostnames from stdin");
            Box::new(BufReader::new(tokio::io::stdin()))
        } else {
            let file = tokio::fs::File::open(&config.file)
                .await
                .with_context(|| format!("Failed to open input file {}", config.file.display()))?;
            Box::new(BufReader::new(file))
        };

        info!(
            "Starting with {} workers, printing {}",
            config.concurrency,
            if config.domain_mode {
                "hostnames"
            } else {
                "addresses"
            }
        );

        let start_time = std::time::Instant::now();
        let cancel = CancellationToken::new();
        let cancel_logging = cancel.child_token();
        let stats_for_logging = pool.stats();

        let logging_task = Some(tokio::task::spawn(async move {
            let mut interval = tokio::time::interval(LOGGING_INTERVAL);
            // The first tick fires immediately
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        log_progress(start_time, &stats_for_logging);
                    }
                    _ = cancel_logging.cancelled() => {
                        break;
                    }
                }
            }
        }));

        let report = pool.run(input, sink).await;

        shutdown_gracefully(cancel, logging_task).await;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_outcome_statistics(&pool.stats(), elapsed_seconds);

        Ok(FilterReport {
            total_hosts: report.submitted,
            emitted: report.emitted,
            behind_provider: report.behind_provider,
            resolution_failed: report.resolution_failed,
            write_failed: report.write_failed,
            input_error: report.input_error.map(|e| e.to_string()),
            elapsed_seconds,
        })
    }
}
