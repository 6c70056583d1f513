//! Adapter layer: Convert Spotify DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use super::dto;
use crate::enrichment::domain::EnrichmentError;
use crate::model::TrackMetadata;

/// Convert a batch lookup response, dropping `null` (unknown) entries.
pub(crate) fn to_track_metadata(
    response: dto::TracksResponse,
) -> Result<Vec<TrackMetadata>, EnrichmentError> {
    response
        .tracks
        .into_iter()
        .flatten()
        .map(convert_track)
        .collect()
}

fn convert_track(track: dto::Track) -> Result<TrackMetadata, EnrichmentError> {
    let artist = track
        .artists
        .into_iter()
        .next()
        .ok_or_else(|| EnrichmentError::ContractViolation {
            expected: "at least one artist".to_string(),
            actual: format!("no artists on track {}", track.id),
        })?;

    Ok(TrackMetadata {
        artist_name: artist.name,
        artist_id: artist.id,
        album_name: track.album.name,
        album_id: track.album.id,
        track_name: track.name,
        track_id: track.id,
        release_date: track.album.release_date,
        release_date_precision: track.album.release_date_precision,
        duration_ms: track.duration_ms,
        popularity: track.popularity,
        explicit: track.explicit,
    })
}
