mod book;
mod book_card;
mod listing_filter;

pub use book::{Author, BookId, BookRecord, Page, IMAGE_JPEG};
pub use book_card::{BookCard, NO_DESCRIPTION, PLACEHOLDER_IMAGE, UNKNOWN_AUTHOR};
pub use listing_filter::{derive_genres, ListingFilter};
