use std::sync::Arc;

use folio_common::{BookCard, BookId};
use tracing::warn;

use crate::catalog::{FetchError, RecordLookup};
use crate::wishlist::{WishlistError, WishlistStore};

pub const DETAIL_LOAD_FAILED: &str = "Failed to load book details. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Loaded { card: BookCard, in_wishlist: bool },
    Failed(FetchError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

impl AddOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            AddOutcome::Added => "Book added to wishlist!",
            AddOutcome::AlreadyPresent => "This book is already in your wishlist.",
        }
    }
}

/// Single book page: one record fetched by id, plus "add to wishlist".
pub struct BookDetailView {
    lookup: Arc<RecordLookup>,
    wishlist: WishlistStore,
}

impl BookDetailView {
    pub fn new(lookup: Arc<RecordLookup>, wishlist: WishlistStore) -> Self {
        Self { lookup, wishlist }
    }

    pub async fn open(&mut self, id: BookId) -> DetailOutcome {
        match self.lookup.fetch(id).await {
            Ok(record) => {
                self.wishlist.load();
                DetailOutcome::Loaded {
                    card: BookCard::from_record(&record),
                    in_wishlist: self.wishlist.contains(id),
                }
            }
            Err(e) => {
                warn!("Failed to load book {}: {}", id, e);
                DetailOutcome::Failed(e)
            }
        }
    }

    /// Add to the wishlist, re-reading it first so writes made by other
    /// views since this one opened are not lost.
    pub fn add_to_wishlist(&mut self, id: BookId) -> Result<AddOutcome, WishlistError> {
        self.wishlist.load();
        if self.wishlist.add(id)? {
            Ok(AddOutcome::Added)
        } else {
            Ok(AddOutcome::AlreadyPresent)
        }
    }

    pub fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }
}
