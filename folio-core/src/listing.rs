//! Listing coordination: current page, cursors, filter view and genre facet.
//!
//! State machine: `Idle -> Loading` on `load_page`, `Loading -> Loaded` on
//! success, `Loading -> Failed` on a fetch error (previous page kept).
//! At most one load is in flight; a second `load_page` while `Loading` is
//! rejected without touching state.

use std::sync::{Arc, Mutex};

use folio_common::{derive_genres, BookRecord, ListingFilter, Page};
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::FetchError;
use crate::page_cache::PageCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("page numbers start at 1 (got {0})")]
    InvalidPage(u32),
    #[error("page {in_flight} is still loading, rejected request for page {requested}")]
    LoadInFlight { requested: u32, in_flight: u32 },
    #[error("there is no next page")]
    NoNextPage,
    #[error("there is no previous page")]
    NoPreviousPage,
    #[error("failed to load page: {0}")]
    Fetch(#[from] FetchError),
}

/// Everything the rendering layer reads from the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub page_number: Option<u32>,
    /// Records on the current page that pass the filter, in page order
    pub records: Vec<BookRecord>,
    /// Record count of the unfiltered page
    pub page_size: usize,
    pub genres: Vec<String>,
    pub filter: ListingFilter,
    pub load_state: LoadState,
    pub last_error: Option<FetchError>,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Default)]
struct ListingState {
    page: Option<Arc<Page>>,
    filter: ListingFilter,
    filtered: Vec<BookRecord>,
    genres: Vec<String>,
    load_state: LoadState,
    loading_page: Option<u32>,
    last_error: Option<FetchError>,
}

impl ListingState {
    fn install(&mut self, page: Arc<Page>) {
        self.filter = ListingFilter::default();
        self.filtered = page.records.clone();
        self.genres = derive_genres(&page.records);
        self.page = Some(page);
        self.load_state = LoadState::Loaded;
        self.last_error = None;
    }

    fn refilter(&mut self) {
        self.filtered = match &self.page {
            Some(page) => self.filter.apply(&page.records),
            None => Vec::new(),
        };
    }
}

/// Restores the pre-load state if a load future is dropped before it
/// resolves, so an abandoned load cannot wedge the controller in `Loading`.
struct LoadGuard<'a> {
    state: &'a Mutex<ListingState>,
    previous: LoadState,
    settled: bool,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Ok(mut state) = self.state.lock() {
            state.load_state = self.previous;
            state.loading_page = None;
        }
    }
}

pub struct ListingController {
    cache: PageCache,
    state: Mutex<ListingState>,
}

impl ListingController {
    pub fn new(cache: PageCache) -> Self {
        Self {
            cache,
            state: Mutex::new(ListingState::default()),
        }
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Load `page_number` through the cache and make it the current page.
    ///
    /// On success the filter resets to show the whole page and the genre
    /// facet is recomputed. On a fetch error the previous page stays current,
    /// the state becomes `Failed` and the error is returned. No retry.
    pub async fn load_page(&self, page_number: u32) -> Result<(), ListingError> {
        if page_number == 0 {
            return Err(ListingError::InvalidPage(page_number));
        }

        let mut guard = {
            let mut state = self.state.lock().unwrap();
            if state.load_state == LoadState::Loading {
                let in_flight = state.loading_page.unwrap_or_default();
                warn!(
                    "Rejected load of page {} while page {} is loading",
                    page_number, in_flight
                );
                return Err(ListingError::LoadInFlight {
                    requested: page_number,
                    in_flight,
                });
            }
            let previous = state.load_state;
            state.load_state = LoadState::Loading;
            state.loading_page = Some(page_number);
            LoadGuard {
                state: &self.state,
                previous,
                settled: false,
            }
        };

        info!("Loading page {}", page_number);
        let result = self.cache.get(page_number).await;

        let mut state = self.state.lock().unwrap();
        guard.settled = true;
        state.loading_page = None;
        match result {
            Ok(page) => {
                state.install(page);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load page {}: {}", page_number, e);
                state.load_state = LoadState::Failed;
                state.last_error = Some(e.clone());
                Err(ListingError::Fetch(e))
            }
        }
    }

    /// Load the page after the current one. Requires a forward cursor.
    pub async fn go_next(&self) -> Result<(), ListingError> {
        let target = {
            let state = self.state.lock().unwrap();
            match &state.page {
                Some(page) if page.has_next() => page.page_number + 1,
                _ => return Err(ListingError::NoNextPage),
            }
        };
        self.load_page(target).await
    }

    /// Load the page before the current one. Requires a backward cursor.
    pub async fn go_prev(&self) -> Result<(), ListingError> {
        let target = {
            let state = self.state.lock().unwrap();
            match &state.page {
                Some(page) if page.has_prev() => page.page_number.saturating_sub(1),
                _ => return Err(ListingError::NoPreviousPage),
            }
        };
        self.load_page(target).await
    }

    /// Recompute the filtered view over the current page and return it.
    ///
    /// Does not touch the cache or cursors. An empty `genre` means all genres.
    pub fn apply_filter(&self, text: &str, genre: Option<&str>) -> Vec<BookRecord> {
        let mut state = self.state.lock().unwrap();
        state.filter = ListingFilter::new(text, genre);
        state.refilter();
        state.filtered.clone()
    }

    /// Distinct subjects of the current page (not the whole cache), sorted.
    pub fn derive_genres(&self) -> Vec<String> {
        self.state.lock().unwrap().genres.clone()
    }

    pub fn filtered_records(&self) -> Vec<BookRecord> {
        self.state.lock().unwrap().filtered.clone()
    }

    pub fn current_page(&self) -> Option<Arc<Page>> {
        self.state.lock().unwrap().page.clone()
    }

    pub fn current_page_number(&self) -> Option<u32> {
        self.state
            .lock()
            .unwrap()
            .page
            .as_ref()
            .map(|p| p.page_number)
    }

    pub fn has_next(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .page
            .as_ref()
            .is_some_and(|p| p.has_next())
    }

    pub fn has_prev(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .page
            .as_ref()
            .is_some_and(|p| p.has_prev())
    }

    pub fn load_state(&self) -> LoadState {
        self.state.lock().unwrap().load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state() == LoadState::Loading
    }

    pub fn has_failed(&self) -> bool {
        self.load_state() == LoadState::Failed
    }

    pub fn last_error(&self) -> Option<FetchError> {
        self.state.lock().unwrap().last_error.clone()
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        let state = self.state.lock().unwrap();
        ListingSnapshot {
            page_number: state.page.as_ref().map(|p| p.page_number),
            records: state.filtered.clone(),
            page_size: state.page.as_ref().map_or(0, |p| p.records.len()),
            genres: state.genres.clone(),
            filter: state.filter.clone(),
            load_state: state.load_state,
            last_error: state.last_error.clone(),
            has_next: state.page.as_ref().is_some_and(|p| p.has_next()),
            has_prev: state.page.as_ref().is_some_and(|p| p.has_prev()),
        }
    }
}
