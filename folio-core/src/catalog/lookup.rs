use std::sync::Arc;

use folio_common::{BookId, BookRecord};
use futures::future::{try_join_all, FutureExt};
use tracing::warn;

use super::{FetchError, RemoteCatalog};
use crate::inflight::SharedRequests;

/// Single-record fetches, with concurrent requests for the same id sharing
/// one remote call. Records are not cached beyond the in-flight window.
pub struct RecordLookup {
    catalog: Arc<dyn RemoteCatalog>,
    in_flight: SharedRequests<BookId, Arc<BookRecord>, FetchError>,
}

impl RecordLookup {
    pub fn new(catalog: Arc<dyn RemoteCatalog>) -> Self {
        Self {
            catalog,
            in_flight: SharedRequests::new(),
        }
    }

    pub async fn fetch(&self, id: BookId) -> Result<Arc<BookRecord>, FetchError> {
        let catalog = self.catalog.clone();
        self.in_flight
            .run(id, move || {
                async move { catalog.fetch_by_id(id).await.map(Arc::new) }.boxed()
            })
            .await
    }

    /// Fetch every id concurrently. All-or-nothing: the first failure fails
    /// the whole batch and any successful results are discarded.
    pub async fn fetch_all(&self, ids: &[BookId]) -> Result<Vec<Arc<BookRecord>>, FetchError> {
        try_join_all(ids.iter().map(|&id| self.fetch(id)))
            .await
            .inspect_err(|e| warn!("Batch fetch of {} records failed: {}", ids.len(), e))
    }
}
