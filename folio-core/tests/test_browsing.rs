//! End-to-end browsing sessions over a fake catalog:
//! - listing pagination, cache reuse and filtering
//! - wishlist shared between listing, detail and wishlist views
mod support;
use crate::support::{tracing_init, FakeCatalog};
use folio_core::storage::{FileStore, KeyValueStore, MemoryStore};
use folio_core::views::{AddOutcome, BookDetailView, DetailOutcome, WishlistOutcome, WishlistView};
use folio_core::wishlist::WISHLIST_STORAGE_KEY;
use folio_core::{ListingController, ListingError, PageCache, RecordLookup, WishlistStore};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_browse_forward_and_back() {
    tracing_init();
    let catalog = Arc::new(FakeCatalog::new(3, 4));
    let listing = ListingController::new(PageCache::new(catalog.clone()));

    listing.load_page(1).await.expect("page 1");
    let snapshot = listing.snapshot();
    assert!(!snapshot.has_prev);
    assert!(snapshot.has_next);
    assert_eq!(snapshot.page_size, 4);

    listing.go_next().await.expect("page 2");
    listing.go_next().await.expect("page 3");
    assert!(!listing.has_next());
    assert!(matches!(
        listing.go_next().await,
        Err(ListingError::NoNextPage)
    ));

    listing.go_prev().await.expect("page 2");
    listing.go_prev().await.expect("page 1");
    assert_eq!(listing.current_page_number(), Some(1));

    // Every page was fetched exactly once
    assert_eq!(catalog.page_calls(), vec![1, 2, 3]);
    assert_eq!(listing.cache().len(), 3);
}

#[tokio::test]
async fn test_filter_over_current_page_only() {
    tracing_init();
    let catalog = Arc::new(FakeCatalog::new(2, 6));
    let listing = ListingController::new(PageCache::new(catalog));

    listing.load_page(2).await.expect("page 2");
    let genres = listing.derive_genres();
    let mut sorted = genres.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(genres, sorted);

    let poetry = listing.apply_filter("volume", Some("Poetry"));
    assert!(!poetry.is_empty());
    assert!(poetry.iter().all(|r| r.has_subject("Poetry")));
    assert!(poetry.iter().all(|r| (7..=12).contains(&r.id)));

    let none = listing.apply_filter("no such title", None);
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_wishlist_across_views() {
    tracing_init();
    let dir = TempDir::new().unwrap();
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path().join("storage.json")));
    let catalog = Arc::new(FakeCatalog::new(1, 5));
    let lookup = Arc::new(RecordLookup::new(catalog.clone()));

    // Listing view toggles two books
    let mut listing_wishlist = WishlistStore::open(storage.clone());
    assert!(listing_wishlist.toggle(2).unwrap());
    assert!(listing_wishlist.toggle(4).unwrap());
    assert_eq!(listing_wishlist.count(), 2);

    // Detail view adds one more and sees the existing ones
    let mut detail = BookDetailView::new(lookup.clone(), WishlistStore::open(storage.clone()));
    match detail.open(4).await {
        DetailOutcome::Loaded { in_wishlist, .. } => assert!(in_wishlist),
        other => panic!("expected loaded, got {other:?}"),
    }
    assert_eq!(detail.add_to_wishlist(4).unwrap(), AddOutcome::AlreadyPresent);
    assert_eq!(detail.add_to_wishlist(5).unwrap(), AddOutcome::Added);

    // Listing view is stale until it reloads
    assert_eq!(listing_wishlist.count(), 2);
    listing_wishlist.load();
    assert_eq!(listing_wishlist.count(), 3);

    // Wishlist view materializes all three
    let mut wishlist_view = WishlistView::new(lookup, WishlistStore::open(storage.clone()));
    match wishlist_view.refresh().await {
        WishlistOutcome::Loaded(records) => {
            let ids: Vec<_> = records.iter().map(|r| r.id).collect();
            assert_eq!(ids, vec![2, 4, 5]);
        }
        other => panic!("expected loaded, got {other:?}"),
    }
    assert_eq!(storage.get_item(WISHLIST_STORAGE_KEY).as_deref(), Some("[2,4,5]"));
}

#[tokio::test]
async fn test_wishlist_fan_out_failure_is_total() {
    tracing_init();
    let storage = Arc::new(MemoryStore::new().with_item(WISHLIST_STORAGE_KEY, "[1,2,3]"));
    let catalog = Arc::new(FakeCatalog::new(1, 3).failing(2));
    let mut view = WishlistView::new(
        Arc::new(RecordLookup::new(catalog)),
        WishlistStore::open(storage),
    );

    assert!(matches!(view.refresh().await, WishlistOutcome::Failed(_)));

    // Removing the broken id lets the rest render
    match view.remove(2).await.unwrap() {
        WishlistOutcome::Loaded(records) => assert_eq!(records.len(), 2),
        other => panic!("expected loaded, got {other:?}"),
    }
}
