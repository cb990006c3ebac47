//! Core of the folio catalog browser: remote catalog access, the session page
//! cache, listing coordination and the persisted wishlist.

pub mod catalog;
pub mod config;
pub mod inflight;
pub mod listing;
pub mod page_cache;
pub mod storage;
pub mod views;
pub mod wishlist;

#[cfg(test)]
mod test_helpers;

pub use catalog::{FetchError, GutendexClient, RecordLookup, RemoteCatalog};
pub use config::Config;
pub use listing::{ListingController, ListingError, ListingSnapshot, LoadState};
pub use page_cache::PageCache;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use wishlist::{WishlistError, WishlistStore};
