//! Bounded-concurrency resolution pipeline.
//!
//! The producer reads one hostname at a time and hands it to a new job only
//! once one of the `concurrency` permits is free, so input is consumed no
//! faster than names are resolved. Each job resolves its hostname, tests the
//! first address against the [`RangeIndex`], and writes hosts outside every
//! range to the [`LineSink`]. Resolution failures are counted and dropped.
//! [`ResolverPool::run`] returns only after every job has finished.

mod sink;

use std::io::Write;
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use log::{debug, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Semaphore;
use tokio::task::JoinError;

use crate::config::OutputMode;
use crate::dns::HostResolver;
use crate::error_handling::{InitializationError, OutcomeType, ProcessingStats};
use crate::ranges::RangeIndex;

pub use sink::LineSink;

/// Summary of one pool run.
#[derive(Debug)]
pub struct PoolReport {
    /// Hostnames handed to workers
    pub submitted: usize,
    /// Lines written to the sink
    pub emitted: usize,
    /// Hosts suppressed because they resolved into a configured range
    pub behind_provider: usize,
    /// Hosts dropped because resolution failed
    pub resolution_failed: usize,
    /// Hosts that should have been written but the sink failed
    pub write_failed: usize,
    /// Read error that ended input early, if any
    pub input_error: Option<std::io::Error>,
}

/// Everything a job needs, shared read-only across jobs.
struct JobContext<W> {
    resolver: Arc<dyn HostResolver>,
    index: Arc<RangeIndex>,
    mode: OutputMode,
    sink: Arc<LineSink<W>>,
    stats: Arc<ProcessingStats>,
}

/// Resolves hostnames concurrently and reports those outside the range index.
pub struct ResolverPool {
    resolver: Arc<dyn HostResolver>,
    index: Arc<RangeIndex>,
    mode: OutputMode,
    concurrency: usize,
    stats: Arc<ProcessingStats>,
}

impl ResolverPool {
    /// Creates a pool with `concurrency` workers.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidConcurrencyError` if `concurrency` is
    /// zero or larger than the semaphore can hold.
    pub fn new(
        resolver: Arc<dyn HostResolver>,
        index: Arc<RangeIndex>,
        mode: OutputMode,
        concurrency: usize,
    ) -> Result<Self, InitializationError> {
        if concurrency == 0 || concurrency > Semaphore::MAX_PERMITS {
            return Err(InitializationError::InvalidConcurrencyError(concurrency));
        }
        Ok(ResolverPool {
            resolver,
            index,
            mode,
            concurrency,
            stats: Arc::new(ProcessingStats::new()),
        })
    }

    /// Live counters for this pool, e.g. for progress logging.
    pub fn stats(&self) -> Arc<ProcessingStats> {
        Arc::clone(&self.stats)
    }

    /// Consumes `input` line by line until EOF or a read error, and waits for
    /// every submitted job before returning.
    ///
    /// Lines are not required to be UTF-8; invalid sequences are replaced
    /// and the line is submitted like any other. A read error stops
    /// production; jobs already submitted still finish and the error is
    /// returned in [`PoolReport::input_error`].
    pub async fn run<R, W>(&self, input: R, sink: Arc<LineSink<W>>) -> PoolReport
    where
        R: AsyncBufRead + Unpin,
        W: Write + Send + 'static,
    {
        let ctx = Arc::new(JobContext {
            resolver: Arc::clone(&self.resolver),
            index: Arc::clone(&self.index),
            mode: self.mode,
            sink,
            stats: Arc::clone(&self.stats),
        });
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = FuturesUnordered::new();
        let mut lines = AsyncBufReadExt::split(input, b'\n');
        let mut input_error = None;

        loop {
            let line = match lines.next_segment().await {
                Ok(Some(bytes)) => decode_line(bytes),
                Ok(None) => break,
                Err(e) => {
                    input_error = Some(e);
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            // Blocks while every worker is busy
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Worker semaphore closed, no further hosts will be submitted");
                    break;
                }
            };

            // Reap finished jobs so the set never grows past the worker count
            while let Some(Some(result)) = tasks.next().now_or_never() {
                log_join_result(result);
            }

            self.stats.increment_submitted();
            let ctx = Arc::clone(&ctx);
            tasks.push(tokio::spawn(async move {
                let _permit = permit;
                let outcome = process_host(&line, &ctx).await;
                ctx.stats.increment(outcome);
            }));
        }

        while let Some(result) = tasks.next().await {
            log_join_result(result);
        }

        PoolReport {
            submitted: self.stats.submitted(),
            emitted: self.stats.get_count(OutcomeType::Emitted),
            behind_provider: self.stats.get_count(OutcomeType::BehindProvider),
            resolution_failed: self.stats.get_count(OutcomeType::ResolutionFailed),
            write_failed: self.stats.get_count(OutcomeType::WriteFailed),
            input_error,
        }
    }
}

/// Strips the line terminator (`\n` already removed, `\r` here) and decodes.
fn decode_line(mut bytes: Vec<u8>) -> String {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(e) => {
            let line = String::from_utf8_lossy(e.as_bytes()).into_owned();
            debug!("Input line is not valid UTF-8, using {line:?}");
            line
        }
    }
}

/// Resolve, test, emit for a single input line.
async fn process_host<W: Write>(line: &str, ctx: &JobContext<W>) -> OutcomeType {
    let host = line.trim();

    let addr = match ctx.resolver.resolve_first(host).await {
        Ok(addr) => addr,
        Err(_) => return OutcomeType::ResolutionFailed,
    };

    if ctx.index.contains(addr) {
        return OutcomeType::BehindProvider;
    }

    let written = match ctx.mode {
        OutputMode::Hostname => ctx.sink.emit(line),
        OutputMode::Address => ctx.sink.emit(&addr.to_string()),
    };

    match written {
        Ok(()) => OutcomeType::Emitted,
        Err(e) => {
            debug!("Failed to write result for {host}: {e}");
            OutcomeType::WriteFailed
        }
    }
}

fn log_join_result(result: Result<(), JoinError>) {
    if let Err(join_error) = result {
        warn!("Task panicked: {:?}", join_error);
    }
}
