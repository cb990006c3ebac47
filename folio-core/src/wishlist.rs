//! Persisted wishlist of book ids.
//!
//! Stored as a JSON array under one fixed key. Each view owns its own
//! `WishlistStore`; there is no change notification between them, so a view
//! sees another view's writes only after calling [`WishlistStore::load`].

use std::sync::Arc;

use folio_common::BookId;
use thiserror::Error;
use tracing::{info, warn};

use crate::storage::{KeyValueStore, StorageError};

pub const WISHLIST_STORAGE_KEY: &str = "gutenberg-wishlist";

#[derive(Error, Debug)]
pub enum WishlistError {
    #[error("failed to persist wishlist: {0}")]
    Storage(#[from] StorageError),
}

pub struct WishlistStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    /// Insertion order is kept because the payload is a sequence, but carries
    /// no meaning. Never contains duplicates.
    ids: Vec<BookId>,
}

impl WishlistStore {
    /// Open the wishlist under the default key and load it.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, WISHLIST_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            ids: Vec::new(),
        };
        store.load();
        store
    }

    /// Re-read the persisted set. Absent or malformed data is an empty set.
    pub fn load(&mut self) -> Vec<BookId> {
        self.ids = match self.storage.get_item(&self.key) {
            Some(raw) => parse_ids(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed wishlist under {}: {}", self.key, e);
                Vec::new()
            }),
            None => Vec::new(),
        };
        self.ids.clone()
    }

    pub fn ids(&self) -> &[BookId] {
        &self.ids
    }

    pub fn contains(&self, id: BookId) -> bool {
        self.ids.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Insert `id` and persist. Returns false (and writes nothing) if it was
    /// already present.
    pub fn add(&mut self, id: BookId) -> Result<bool, WishlistError> {
        if self.contains(id) {
            return Ok(false);
        }
        self.ids.push(id);
        if let Err(e) = self.persist() {
            self.ids.pop();
            return Err(e);
        }
        info!("Added book {} to wishlist ({} total)", id, self.ids.len());
        Ok(true)
    }

    /// Remove `id` and persist. Returns false (and writes nothing) if it was
    /// not present.
    pub fn remove(&mut self, id: BookId) -> Result<bool, WishlistError> {
        let Some(index) = self.ids.iter().position(|&x| x == id) else {
            return Ok(false);
        };
        self.ids.remove(index);
        if let Err(e) = self.persist() {
            self.ids.insert(index, id);
            return Err(e);
        }
        info!(
            "Removed book {} from wishlist ({} total)",
            id,
            self.ids.len()
        );
        Ok(true)
    }

    /// Flip membership of `id`, persist, and return whether it is now a member.
    pub fn toggle(&mut self, id: BookId) -> Result<bool, WishlistError> {
        if self.contains(id) {
            self.remove(id)?;
            Ok(false)
        } else {
            self.add(id)?;
            Ok(true)
        }
    }

    fn persist(&self) -> Result<(), WishlistError> {
        let json = serde_json::to_string(&self.ids)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set_item(&self.key, &json)?;
        Ok(())
    }
}

/// Parse a persisted id array, collapsing duplicates (first occurrence wins).
fn parse_ids(raw: &str) -> Result<Vec<BookId>, serde_json::Error> {
    let parsed: Vec<BookId> = serde_json::from_str(raw)?;
    let mut ids = Vec::with_capacity(parsed.len());
    for id in parsed {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
