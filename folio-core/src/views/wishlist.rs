use std::sync::Arc;

use folio_common::{BookId, BookRecord};
use tracing::info;

use crate::catalog::{FetchError, RecordLookup};
use crate::wishlist::{WishlistError, WishlistStore};

pub const WISHLIST_EMPTY: &str = "Your wishlist is empty.";
pub const WISHLIST_LOAD_FAILED: &str = "Failed to load wishlist books. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub enum WishlistOutcome {
    Empty,
    /// Records in wishlist order
    Loaded(Vec<Arc<BookRecord>>),
    /// At least one record failed; nothing is shown
    Failed(FetchError),
}

/// Wishlist page: materializes every stored id into a full record.
pub struct WishlistView {
    lookup: Arc<RecordLookup>,
    wishlist: WishlistStore,
}

impl WishlistView {
    pub fn new(lookup: Arc<RecordLookup>, wishlist: WishlistStore) -> Self {
        Self { lookup, wishlist }
    }

    /// Re-read the wishlist and fetch every record concurrently.
    /// Any single failure fails the whole view.
    pub async fn refresh(&mut self) -> WishlistOutcome {
        let ids = self.wishlist.load();
        if ids.is_empty() {
            return WishlistOutcome::Empty;
        }
        info!("Fetching {} wishlist records", ids.len());
        match self.lookup.fetch_all(&ids).await {
            Ok(records) => WishlistOutcome::Loaded(records),
            Err(e) => WishlistOutcome::Failed(e),
        }
    }

    pub async fn remove(&mut self, id: BookId) -> Result<WishlistOutcome, WishlistError> {
        self.wishlist.load();
        self.wishlist.remove(id)?;
        Ok(self.refresh().await)
    }

    /// Returns the new membership, then refreshes.
    pub async fn toggle(&mut self, id: BookId) -> Result<(bool, WishlistOutcome), WishlistError> {
        self.wishlist.load();
        let member = self.wishlist.toggle(id)?;
        Ok((member, self.refresh().await))
    }

    pub fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }
}
