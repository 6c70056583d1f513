//! History enrichment command.

use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::enrichment::{EnrichmentConfig, EnrichmentService};
use crate::error::{Error, Result};
use crate::history::FileSource;
use crate::output::AppendFileSink;

use super::EnrichOptions;

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub enrichment: EnrichmentConfig,
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Merge command-line options (which already include env vars) over the config file.
pub(crate) fn resolve_settings(config: &Config, options: &EnrichOptions) -> Result<RunSettings> {
    let client_id = options
        .client_id
        .clone()
        .or_else(|| config.credentials.client_id.clone())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::config("Spotify client ID required (--client-id or CLIENT_ID)"))?;
    let client_secret = options
        .client_secret
        .clone()
        .or_else(|| config.credentials.client_secret.clone())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            Error::config("Spotify client secret required (--client-secret or CLIENT_SECRET)")
        })?;

    Ok(RunSettings {
        enrichment: EnrichmentConfig {
            client_id,
            client_secret,
            token_url: options
                .token_url
                .clone()
                .unwrap_or_else(|| config.api.token_url.clone()),
            tracks_url: options
                .tracks_url
                .clone()
                .unwrap_or_else(|| config.api.tracks_url.clone()),
            batch_size: options.batch_size.unwrap_or(config.api.batch_size),
        },
        input: options
            .input
            .clone()
            .unwrap_or_else(|| config.files.input.clone()),
        output: options
            .output
            .clone()
            .unwrap_or_else(|| config.files.output.clone()),
    })
}

/// Enrich the history export and append the rows to the output file
pub fn cmd_enrich(rt: &Runtime, config: &Config, options: &EnrichOptions) -> anyhow::Result<()> {
    let settings = resolve_settings(config, options)?;

    println!("Enriching: {:?}", settings.input);

    let service = EnrichmentService::new(settings.enrichment)?;
    let source = FileSource::new(&settings.input);
    let mut sink = AppendFileSink::new(&settings.output);

    let summary = rt.block_on(service.run(&source, &mut sink))?;

    println!(
        "  {} play events, {} distinct tracks, {} catalog requests",
        summary.events, summary.distinct_tracks, summary.batches
    );
    println!("  {} rows appended to {:?}", summary.written, sink.path());
    if summary.dropped() > 0 {
        println!("  {} plays skipped (no catalog match)", summary.dropped());
    }
    println!();
    println!("Process complete");

    Ok(())
}
