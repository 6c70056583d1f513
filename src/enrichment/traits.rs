//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the Spotify client implementations, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use history_enricher::enrichment::traits::CatalogApi;
//!
//! // In production code:
//! async fn lookup<C: CatalogApi>(client: &C, token: &str, ids: &[String]) {
//!     let tracks = client.get_tracks(token, ids).await?;
//! }
//!
//! // In tests:
//! struct MockCatalog { ... }
//! impl CatalogApi for MockCatalog { ... }
//! ```

use async_trait::async_trait;

use super::domain::EnrichmentError;
use super::spotify::{SpotifyAuthClient, SpotifyCatalogClient};
use crate::model::TrackMetadata;

/// Trait for exchanging client credentials for a bearer token.
#[async_trait]
pub trait TokenApi: Send + Sync {
    async fn request_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String, EnrichmentError>;
}

/// Trait for batch track metadata lookup.
///
/// Implementations return metadata for the IDs the catalog knows; unknown
/// IDs are simply absent from the result.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_tracks(
        &self,
        token: &str,
        ids: &[String],
    ) -> Result<Vec<TrackMetadata>, EnrichmentError>;
}

// Implement traits for real clients

#[async_trait]
impl TokenApi for SpotifyAuthClient {
    async fn request_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String, EnrichmentError> {
        self.request_token(client_id, client_secret).await
    }
}

#[async_trait]
impl CatalogApi for SpotifyCatalogClient {
    async fn get_tracks(
        &self,
        token: &str,
        ids: &[String],
    ) -> Result<Vec<TrackMetadata>, EnrichmentError> {
        self.get_tracks(token, ids).await
    }
}
