//! Spotify catalog HTTP client
//!
//! Looks up several tracks per request via `GET /v1/tracks?ids=...`.
//! See: https://developer.spotify.com/documentation/web-api/reference/get-several-tracks
//!
//! The endpoint accepts at most 50 IDs per call. Batching is the caller's
//! job (see `enrichment::fetch`); this client sends exactly the IDs it is given.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use super::{USER_AGENT, adapter, dto};
use crate::enrichment::domain::EnrichmentError;
use crate::model::TrackMetadata;

/// Default batch track lookup endpoint
pub const DEFAULT_TRACKS_URL: &str = "https://api.spotify.com/v1/tracks";

/// Spotify Web API client for track metadata
pub struct SpotifyCatalogClient {
    http_client: reqwest::Client,
    tracks_url: String,
}

impl SpotifyCatalogClient {
    /// Create a client for the given tracks endpoint
    pub fn new(tracks_url: impl Into<String>) -> Result<Self, EnrichmentError> {
        let tracks_url = tracks_url.into();
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| EnrichmentError::Network {
                url: tracks_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http_client,
            tracks_url,
        })
    }

    /// Fetch metadata for one batch of track IDs
    pub async fn get_tracks(
        &self,
        token: &str,
        ids: &[String],
    ) -> Result<Vec<TrackMetadata>, EnrichmentError> {
        let response = self.send_tracks_request(token, ids).await?;
        adapter::to_track_metadata(response)
    }

    /// Build the lookup URL.
    ///
    /// IDs are joined with literal commas; each ID is percent-encoded on its
    /// own so a stray comma inside an ID cannot split it.
    pub(crate) fn tracks_url_for(&self, ids: &[String]) -> String {
        let joined = ids
            .iter()
            .map(|id| urlencoding::encode(id))
            .collect::<Vec<_>>()
            .join(",");
        format!("{}?ids={}", self.tracks_url, joined)
    }

    async fn send_tracks_request(
        &self,
        token: &str,
        ids: &[String],
    ) -> Result<dto::TracksResponse, EnrichmentError> {
        let url = self.tracks_url_for(ids);
        tracing::debug!(%url, "GET tracks");

        let response = self
            .http_client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| EnrichmentError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            return Err(EnrichmentError::Fetch {
                headers: EnrichmentError::collect_headers(response.headers()),
                url,
                status,
            });
        }

        response
            .json::<dto::TracksResponse>()
            .await
            .map_err(|e| EnrichmentError::Parse {
                url,
                message: e.to_string(),
            })
    }
}
