//! History Enricher - joins a streaming-history export with catalog metadata.
//!
//! Reads a CSV of timestamped plays, looks up every distinct track on the
//! Spotify Web API in batches, and appends one enriched row per play to an
//! output CSV.

pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod history;
pub mod model;
pub mod output;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    // Credentials may live in ./.env; real environment variables win
    dotenvy::dotenv().ok();

    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("history_enricher=info".parse()?))
        .init();

    cli::run_command(&args)
}
