//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `enrich`: Run the enrichment pipeline over a history export
//! - `setup`: Inspect and initialise configuration

mod enrich;
mod setup;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime;

use crate::config;

pub use enrich::cmd_enrich;
pub use setup::{cmd_check, cmd_init_config};

/// Enrich a streaming-history export with track metadata from the Spotify catalog
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the OS default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch metadata for every track in the history and append enriched rows
    Enrich(EnrichOptions),
    /// Show the resolved configuration and whether credentials are available
    Check,
    /// Write a config file with default settings
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Options for the `enrich` command. Unset options fall back to the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct EnrichOptions {
    /// History export to read (CSV; timestamp in column 1, track ID in column 5)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// CSV file to append enriched rows to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Spotify client ID (or set CLIENT_ID env var)
    #[arg(long, env = "CLIENT_ID")]
    pub client_id: Option<String>,

    /// Spotify client secret (or set CLIENT_SECRET env var)
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Token endpoint URL
    #[arg(long)]
    pub token_url: Option<String>,

    /// Batch track lookup endpoint URL
    #[arg(long)]
    pub tracks_url: Option<String>,

    /// Track IDs per lookup request (1-50)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

/// Single-threaded runtime; catalog requests are awaited one at a time.
fn pipeline_runtime() -> std::io::Result<runtime::Runtime> {
    runtime::Builder::new_current_thread().enable_all().build()
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().or_else(config::config_path);
    let file_config = match &config_path {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    match &cli.command {
        Commands::Enrich(options) => {
            let rt = pipeline_runtime()?;
            cmd_enrich(&rt, &file_config, options)
        }
        Commands::Check => cmd_check(&file_config, config_path.as_deref()),
        Commands::InitConfig { force } => cmd_init_config(config_path.as_deref(), *force),
    }
}
