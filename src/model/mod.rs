//! Core data models for the enrichment pipeline.
//!
//! Defines the entities that flow between stages: [`PlayEvent`] (one row of
//! the streaming history), [`TrackMetadata`] (catalog attributes of a track),
//! [`MetadataIndex`] (lookup by track ID) and [`EnrichedRecord`] (one output
//! row).

use std::collections::HashMap;

/// One logged play of a track, as read from the history export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayEvent {
    /// Timestamp text exactly as it appears in the export
    pub timestamp: String,
    /// Catalog track identifier
    pub track_id: String,
}

/// Descriptive attributes of a track fetched from the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    /// Name of the first credited artist
    pub artist_name: String,
    /// Catalog ID of the first credited artist
    pub artist_id: String,
    pub album_name: String,
    pub album_id: String,
    pub track_name: String,
    pub track_id: String,
    /// Album release date (precision varies, see `release_date_precision`)
    pub release_date: String,
    /// One of "year", "month", "day"
    pub release_date_precision: String,
    pub duration_ms: u64,
    /// Catalog popularity score (0-100)
    pub popularity: u32,
    pub explicit: bool,
}

/// Track metadata keyed by track ID.
///
/// Built once by the fetcher and read-only afterwards. IDs the catalog did
/// not return simply have no entry.
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    tracks: HashMap<String, TrackMetadata>,
}

impl MetadataIndex {
    /// Insert a track, replacing any existing entry with the same ID.
    pub(crate) fn insert(&mut self, metadata: TrackMetadata) {
        self.tracks.insert(metadata.track_id.clone(), metadata);
    }

    /// Look up metadata for a track ID.
    pub fn get(&self, track_id: &str) -> Option<&TrackMetadata> {
        self.tracks.get(track_id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl FromIterator<TrackMetadata> for MetadataIndex {
    fn from_iter<I: IntoIterator<Item = TrackMetadata>>(iter: I) -> Self {
        let mut index = Self::default();
        for metadata in iter {
            index.insert(metadata);
        }
        index
    }
}

/// A play event joined with its track metadata: one row of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub timestamp: String,
    pub metadata: TrackMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_track_metadata;

    #[test]
    fn test_index_lookup() {
        let index: MetadataIndex = vec![mock_track_metadata("a"), mock_track_metadata("b")]
            .into_iter()
            .collect();

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a").map(|m| m.track_id.as_str()), Some("a"));
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn test_index_duplicate_overwrites() {
        let first = mock_track_metadata("a");
        let second = TrackMetadata {
            popularity: 99,
            ..mock_track_metadata("a")
        };

        let index: MetadataIndex = vec![first, second].into_iter().collect();

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a").map(|m| m.popularity), Some(99));
    }
}
