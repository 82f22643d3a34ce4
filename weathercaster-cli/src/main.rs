//! Binary crate for the `weathercaster` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and environment variables
//! - Interactive configuration
//! - Logging setup; the forecast itself goes to stdout

use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

mod cli;

/// Environment variable holding a `tracing` filter, e.g. `weathercaster_core=debug`.
const LOG_ENV: &str = "WEATHERCASTER_LOG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);
    cmd.run().await
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
