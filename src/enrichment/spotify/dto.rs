//! Spotify Web API Data Transfer Objects
//!
//! These types match what the Spotify Web API returns, limited to the fields
//! we consume. DO NOT use these types outside the spotify module - convert to
//! domain types in `adapter.rs`.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api/reference/get-several-tracks
//!
//! Example `/v1/tracks?ids=...` response (trimmed):
//! ```json
//! {
//!   "tracks": [{
//!     "id": "11dFghVXANMlKmJXsNCbNl",
//!     "name": "Cut To The Feeling",
//!     "duration_ms": 207959,
//!     "popularity": 63,
//!     "explicit": false,
//!     "artists": [{"id": "6sFIWsNpZYqfjUpaCgueju", "name": "Carly Rae Jepsen"}],
//!     "album": {
//!       "id": "0tGPJ0bkWOUmH7MEOR77qc",
//!       "name": "Cut To The Feeling",
//!       "release_date": "2017-05-26",
//!       "release_date_precision": "day"
//!     }
//!   }, null]
//! }
//! ```
//!
//! Unknown or removed IDs come back as `null` entries in `tracks`.

use serde::{Deserialize, Serialize};

/// Client-credentials token response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    /// Lifetime in seconds
    pub expires_in: Option<u64>,
}

/// Batch track lookup response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TracksResponse {
    pub tracks: Vec<Option<Track>>,
}

/// Full track object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub duration_ms: u64,
    pub popularity: u32,
    pub explicit: bool,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: SimpleAlbum,
}

/// Artist as embedded in a track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimpleArtist {
    pub id: String,
    pub name: String,
}

/// Album as embedded in a track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimpleAlbum {
    pub id: String,
    pub name: String,
    /// "1981", "1981-12" or "1981-12-15" depending on precision
    pub release_date: String,
    /// "year", "month" or "day"
    pub release_date_precision: String,
}
