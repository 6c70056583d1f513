//! Batched metadata lookup.
//!
//! IDs are split into consecutive batches of at most [`MAX_BATCH_SIZE`] and
//! requested one batch at a time. The first failing batch aborts the whole
//! lookup; whatever was collected before it is dropped.

use super::domain::EnrichmentError;
use super::traits::CatalogApi;
use crate::model::MetadataIndex;

/// Most IDs the catalog accepts in one lookup.
pub const MAX_BATCH_SIZE: usize = 50;

/// Clamp a configured batch size to what the catalog accepts.
pub fn effective_batch_size(batch_size: usize) -> usize {
    batch_size.clamp(1, MAX_BATCH_SIZE)
}

/// Number of requests needed for `ids` IDs.
pub fn batch_count(ids: usize, batch_size: usize) -> usize {
    ids.div_ceil(effective_batch_size(batch_size))
}

/// Fetch metadata for every ID, one batch per request, in input order.
pub async fn fetch_metadata<C: CatalogApi + ?Sized>(
    catalog: &C,
    token: &str,
    ids: &[String],
    batch_size: usize,
) -> Result<MetadataIndex, EnrichmentError> {
    let batch_size = effective_batch_size(batch_size);
    let total = batch_count(ids.len(), batch_size);
    let mut index = MetadataIndex::default();

    for (n, batch) in ids.chunks(batch_size).enumerate() {
        tracing::debug!(batch = n + 1, total, size = batch.len(), "Requesting track metadata");

        let tracks = catalog.get_tracks(token, batch).await?;
        for metadata in tracks {
            index.insert(metadata);
        }
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::traits::mocks::MockCatalog;
    use proptest::prelude::*;
    use reqwest::StatusCode;
    use std::collections::HashSet;

    fn make_ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("id{:04}", i)).collect()
    }

    #[tokio::test]
    async fn test_final_partial_batch_is_sent() {
        let catalog = MockCatalog::knowing_everything();
        let ids = make_ids(120);

        let index = fetch_metadata(&catalog, "tok", &ids, MAX_BATCH_SIZE)
            .await
            .unwrap();

        let sizes: Vec<_> = catalog.batches().iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
        assert_eq!(index.len(), 120);
        assert!(catalog.tokens().iter().all(|t| t == "tok"));
    }

    #[tokio::test]
    async fn test_no_ids_means_no_requests() {
        let catalog = MockCatalog::knowing_everything();

        let index = fetch_metadata(&catalog, "tok", &[], MAX_BATCH_SIZE)
            .await
            .unwrap();

        assert!(index.is_empty());
        assert!(catalog.batches().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ids_are_absent_from_index() {
        let catalog = MockCatalog::knowing(&["id0000", "id0002"]);

        let index = fetch_metadata(&catalog, "tok", &make_ids(3), MAX_BATCH_SIZE)
            .await
            .unwrap();

        assert_eq!(index.len(), 2);
        assert!(index.get("id0001").is_none());
    }

    #[tokio::test]
    async fn test_failing_batch_aborts_without_further_requests() {
        let catalog = MockCatalog::knowing_everything().failing_on(1, StatusCode::INTERNAL_SERVER_ERROR);

        let result = fetch_metadata(&catalog, "tok", &make_ids(150), MAX_BATCH_SIZE).await;

        match result {
            Err(EnrichmentError::Fetch { status, .. }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
        assert_eq!(catalog.batches().len(), 2);
    }

    #[test]
    fn test_batch_size_is_clamped() {
        assert_eq!(effective_batch_size(0), 1);
        assert_eq!(effective_batch_size(10), 10);
        assert_eq!(effective_batch_size(500), MAX_BATCH_SIZE);
        assert_eq!(batch_count(101, 500), 3);
        assert_eq!(batch_count(0, 50), 0);
    }

    proptest! {
        /// ceil(N/size) requests, each within the limit, covering every ID exactly once in order
        #[test]
        fn batches_partition_ids(n in 0usize..400, size in 1usize..=MAX_BATCH_SIZE) {
            let ids = make_ids(n);
            let catalog = MockCatalog::knowing_everything();
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();

            rt.block_on(fetch_metadata(&catalog, "tok", &ids, size)).unwrap();

            let batches = catalog.batches();
            prop_assert_eq!(batches.len(), n.div_ceil(size));
            prop_assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= size));

            let flattened: Vec<String> = batches.into_iter().flatten().collect();
            let distinct: HashSet<_> = flattened.iter().collect();
            prop_assert_eq!(distinct.len(), flattened.len());
            prop_assert_eq!(flattened, ids);
        }
    }
}
