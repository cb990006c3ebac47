//! Session cache of fetched catalog pages.
//!
//! Pages are keyed by page number and kept for the lifetime of the cache: no
//! eviction, no TTL. A page that is present is never fetched again, even if
//! the catalog may have changed since. Failed fetches are not cached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use folio_common::Page;
use futures::future::FutureExt;
use tracing::{debug, info};

use crate::catalog::{FetchError, RemoteCatalog};
use crate::inflight::SharedRequests;

type PageMap = Arc<Mutex<HashMap<u32, Arc<Page>>>>;

pub struct PageCache {
    catalog: Arc<dyn RemoteCatalog>,
    pages: PageMap,
    in_flight: SharedRequests<u32, Arc<Page>, FetchError>,
}

impl PageCache {
    pub fn new(catalog: Arc<dyn RemoteCatalog>) -> Self {
        Self {
            catalog,
            pages: Arc::new(Mutex::new(HashMap::new())),
            in_flight: SharedRequests::new(),
        }
    }

    /// Return the cached page, or fetch and store it.
    ///
    /// Concurrent calls for the same uncached page share one remote request.
    pub async fn get(&self, page_number: u32) -> Result<Arc<Page>, FetchError> {
        if let Some(page) = self.cached(page_number) {
            debug!("Page {} served from cache", page_number);
            return Ok(page);
        }

        let catalog = self.catalog.clone();
        let pages = self.pages.clone();
        self.in_flight
            .run(page_number, move || {
                async move {
                    // Another request may have landed since the first lookup.
                    let landed = pages.lock().unwrap().get(&page_number).cloned();
                    if let Some(page) = landed {
                        return Ok(page);
                    }
                    debug!("Page {} not cached, fetching", page_number);
                    let page = Arc::new(catalog.fetch_page(page_number).await?);
                    pages.lock().unwrap().insert(page_number, page.clone());
                    info!(
                        "Cached page {} ({} records)",
                        page_number,
                        page.records.len()
                    );
                    Ok(page)
                }
                .boxed()
            })
            .await
    }

    pub fn cached(&self, page_number: u32) -> Option<Arc<Page>> {
        self.pages.lock().unwrap().get(&page_number).cloned()
    }

    pub fn contains(&self, page_number: u32) -> bool {
        self.pages.lock().unwrap().contains_key(&page_number)
    }

    pub fn len(&self) -> usize {
        self.pages.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached page. Requests already in flight still complete.
    pub fn clear(&self) {
        let mut pages = self.pages.lock().unwrap();
        info!("Clearing page cache ({} pages)", pages.len());
        pages.clear();
    }
}
