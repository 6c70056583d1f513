//! Attach fetched metadata to play events.

use crate::model::{EnrichedRecord, MetadataIndex, PlayEvent};

/// Join each event with its metadata, in event order.
///
/// Events whose track has no index entry (e.g. delisted tracks) are dropped
/// without an error, so the output can be shorter than the input.
pub fn join(events: &[PlayEvent], index: &MetadataIndex) -> Vec<EnrichedRecord> {
    events
        .iter()
        .filter_map(|event| {
            index.get(&event.track_id).map(|metadata| EnrichedRecord {
                timestamp: event.timestamp.clone(),
                metadata: metadata.clone(),
            })
        })
        .collect()
}
