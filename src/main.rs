//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cf_check` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Reporting fatal errors and input read errors on stderr
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use cf_check::initialization::init_logger_with;
use cf_check::{run_filter, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_filter(config).await {
        Ok(report) => {
            if let Some(e) = report.input_error {
                eprintln!("failed to read input: {e}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("cf_check error: {:#}", e);
            process::exit(1);
        }
    }
}
