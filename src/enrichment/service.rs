//! Enrichment service - runs the whole history enrichment pipeline
//!
//! 1. Exchange client credentials for a bearer token
//! 2. Load the history and collect distinct track IDs
//! 3. Fetch metadata for those IDs in batches
//! 4. Load the history again and join each event with its metadata
//! 5. Write the joined rows to the output sink
//!
//! Every step must succeed before anything reaches the sink; the first
//! error ends the run.

use crate::enrichment::{
    fetch::{self, MAX_BATCH_SIZE},
    join::join,
    spotify::{DEFAULT_TOKEN_URL, DEFAULT_TRACKS_URL, SpotifyAuthClient, SpotifyCatalogClient},
    traits::{CatalogApi, TokenApi},
};
use crate::error::{Result, ResultExt};
use crate::history::{self, HistorySource};
use crate::output::{self, RecordSink};

/// Configuration for the enrichment service
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub tracks_url: String,
    /// IDs per catalog request (clamped to 1..=50)
    pub batch_size: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            tracks_url: DEFAULT_TRACKS_URL.to_string(),
            batch_size: MAX_BATCH_SIZE,
        }
    }
}

/// Counts describing a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Play events read from the history
    pub events: usize,
    /// Distinct track IDs looked up
    pub distinct_tracks: usize,
    /// Catalog requests made
    pub batches: usize,
    /// Rows written (events whose track had metadata)
    pub written: usize,
}

impl RunSummary {
    /// Events dropped because their track had no metadata
    pub fn dropped(&self) -> usize {
        self.events - self.written
    }
}

/// Service for enriching a streaming history with catalog metadata
pub struct EnrichmentService<A = SpotifyAuthClient, C = SpotifyCatalogClient> {
    config: EnrichmentConfig,
    auth: A,
    catalog: C,
}

impl EnrichmentService {
    /// Create a service backed by the Spotify clients
    pub fn new(config: EnrichmentConfig) -> Result<Self> {
        Ok(Self {
            auth: SpotifyAuthClient::new(&config.token_url)?,
            catalog: SpotifyCatalogClient::new(&config.tracks_url)?,
            config,
        })
    }
}

impl<A: TokenApi, C: CatalogApi> EnrichmentService<A, C> {
    /// Create a service with custom clients (used by tests)
    pub fn with_clients(config: EnrichmentConfig, auth: A, catalog: C) -> Self {
        Self {
            config,
            auth,
            catalog,
        }
    }

    /// Run the pipeline from `source` into `sink`
    pub async fn run<S, W>(&self, source: &S, sink: &mut W) -> Result<RunSummary>
    where
        S: HistorySource + ?Sized,
        W: RecordSink + ?Sized,
    {
        let token = self
            .auth
            .request_token(&self.config.client_id, &self.config.client_secret)
            .await?;
        tracing::info!("Obtained access token");

        let events = history::load(source)?;
        let ids = history::collect_track_ids(&events);
        tracing::info!(
            events = events.len(),
            distinct = ids.len(),
            "Loaded streaming history"
        );

        let batches = fetch::batch_count(ids.len(), self.config.batch_size);
        let index = fetch::fetch_metadata(&self.catalog, &token, &ids, self.config.batch_size).await?;
        tracing::info!(batches, tracks = index.len(), "Fetched track metadata");
        if index.is_empty() && !ids.is_empty() {
            tracing::warn!("Catalog knew none of the requested tracks");
        }

        // The joiner walks a fresh read of the history
        let events = history::load(source)?;
        let records = join(&events, &index);

        let written = output::write_records(&records, sink)
            .with_context("Failed to write enriched history")?;
        tracing::info!(written, dropped = events.len() - written, "Wrote enriched rows");

        Ok(RunSummary {
            events: events.len(),
            distinct_tracks: ids.len(),
            batches,
            written,
        })
    }
}
