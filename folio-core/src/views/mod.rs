//! Per-page coordinators for the detail and wishlist views.
//!
//! The listing view is [`crate::listing::ListingController`] plus its own
//! [`crate::wishlist::WishlistStore`].

mod book_detail;
mod wishlist;

pub use book_detail::{AddOutcome, BookDetailView, DetailOutcome, DETAIL_LOAD_FAILED};
pub use wishlist::{WishlistOutcome, WishlistView, WISHLIST_EMPTY, WISHLIST_LOAD_FAILED};
