//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_CONCURRENCY, DNS_ATTEMPTS, DNS_TIMEOUT_SECS, STDIN_PATH};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// What is written for each host that is not behind the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// The resolved address, e.g. `203.0.113.7`
    Address,
    /// The hostname line exactly as it was read
    Hostname,
}

/// Filter configuration.
///
/// Doubles as the command-line parser for the binary and can be built
/// programmatically through [`Default`].
///
/// # Examples
///
/// ```no_run
/// use cf_check::Config;
///
/// let config = Config {
///     concurrency: 64,
///     domain_mode: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cf_check",
    version,
    about = "Print hosts from stdin that do not resolve into Cloudflare's address ranges",
    long_about = None
)]
pub struct Config {
    /// File to read hostnames from, one per line (`-` for stdin)
    #[arg(default_value = STDIN_PATH)]
    pub file: PathBuf,

    /// Number of concurrent lookups
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Print the hostname instead of the resolved address
    #[arg(short = 'd', long)]
    pub domain_mode: bool,

    /// Range table file (one CIDR per line); defaults to the embedded Cloudflare table
    #[arg(long)]
    pub ranges: Option<PathBuf>,

    /// Per-query DNS timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_seconds: u64,

    /// Attempts per DNS query
    #[arg(long, default_value_t = DNS_ATTEMPTS)]
    pub dns_attempts: usize,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Output mode selected by `--domain-mode`.
    pub fn output_mode(&self) -> OutputMode {
        if self.domain_mode {
            OutputMode::Hostname
        } else {
            OutputMode::Address
        }
    }

    /// Whether input is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.file.as_os_str() == STDIN_PATH
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(STDIN_PATH),
            concurrency: DEFAULT_CONCURRENCY,
            domain_mode: false,
            ranges: None,
            dns_timeout_seconds: DNS_TIMEOUT_SECS,
            dns_attempts: DNS_ATTEMPTS,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}
