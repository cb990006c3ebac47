use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};

/// Stores all items as one JSON object in a file.
///
/// Every read goes to disk, so separate stores (or processes) over the same
/// file see each other's writes on their next read. Last write wins.
/// Writes go to a sibling temp file and are renamed into place.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unreadable or malformed files read as empty.
    fn read_items(&self) -> BTreeMap<String, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(
                "Ignoring malformed storage file {}: {}",
                self.path.display(),
                e
            );
            BTreeMap::new()
        })
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.read_items().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read_items();
        items.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&items)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Wrote {} to {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get_item("gutenberg-wishlist"), None);
    }

    #[test]
    fn test_set_then_get_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let store = FileStore::new(&path);

        store.set_item("gutenberg-wishlist", "[12,45]").unwrap();
        store.set_item("other", "x").unwrap();

        assert!(path.exists());
        assert_eq!(
            store.get_item("gutenberg-wishlist").as_deref(),
            Some("[12,45]")
        );
        assert_eq!(store.get_item("other").as_deref(), Some("x"));
    }

    #[test]
    fn test_two_stores_share_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let a = FileStore::new(&path);
        let b = FileStore::new(&path);

        a.set_item("k", "from-a").unwrap();
        assert_eq!(b.get_item("k").as_deref(), Some("from-a"));

        b.set_item("k", "from-b").unwrap();
        assert_eq!(a.get_item("k").as_deref(), Some("from-b"));
    }

    #[test]
    fn test_malformed_file_reads_empty_and_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);

        assert_eq!(store.get_item("k"), None);
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").as_deref(), Some("v"));
    }
}
