//! Plain-text rendering of the three views.

use folio_common::{BookCard, BookRecord};
use folio_core::listing::{ListingSnapshot, LoadState};
use folio_core::views::{
    DetailOutcome, WishlistOutcome, DETAIL_LOAD_FAILED, WISHLIST_EMPTY, WISHLIST_LOAD_FAILED,
};
use folio_core::WishlistStore;

pub const LOAD_FAILED: &str = "Failed to load data.";

pub fn wishlist_label(in_wishlist: bool) -> &'static str {
    if in_wishlist {
        "❤️ Wishlisted"
    } else {
        "♡ Wishlist"
    }
}

pub fn format_card(record: &BookRecord, in_wishlist: bool) -> String {
    let card = BookCard::from_record(record);
    format!(
        "[{id}] {title}\n    by {authors}\n    genres: {genres}\n    cover: {image}\n    {label}",
        id = card.id,
        title = card.title,
        authors = card.authors,
        genres = card.card_genres(),
        image = card.image_url,
        label = wishlist_label(in_wishlist),
    )
}

pub fn format_pagination(snapshot: &ListingSnapshot) -> String {
    let mut buttons = Vec::new();
    if snapshot.has_prev {
        buttons.push("[Previous]");
    }
    if snapshot.has_next {
        buttons.push("[Next]");
    }
    buttons.join(" ")
}

pub fn format_listing(snapshot: &ListingSnapshot, wishlist: &WishlistStore) -> String {
    let mut out = String::new();
    if snapshot.load_state == LoadState::Failed {
        out.push_str(LOAD_FAILED);
        out.push('\n');
    }
    let Some(page_number) = snapshot.page_number else {
        return out;
    };

    out.push_str(&format!(
        "Page {} - showing {} of {} books - Wishlist ({})\n",
        page_number,
        snapshot.records.len(),
        snapshot.page_size,
        wishlist.count()
    ));
    if !snapshot.filter.is_empty() {
        out.push_str(&format!(
            "Filter: \"{}\" in {}\n",
            snapshot.filter.text,
            snapshot.filter.genre.as_deref().unwrap_or("All Genres")
        ));
    }
    out.push('\n');
    for record in &snapshot.records {
        out.push_str(&format_card(record, wishlist.contains(record.id)));
        out.push_str("\n\n");
    }
    out.push_str(&format_pagination(snapshot));
    out
}

pub fn format_genres(genres: &[String]) -> String {
    let mut out = String::from("All Genres");
    for genre in genres {
        out.push('\n');
        out.push_str(genre);
    }
    out
}

pub fn format_detail(outcome: &DetailOutcome) -> String {
    match outcome {
        DetailOutcome::Loaded { card, in_wishlist } => format!(
            "{title}\nAuthor: {author}\nGenres: {genres}\nCover: {image}\n\nDescription:\n{description}\n\n{label}",
            title = card.title,
            author = card.primary_author,
            genres = card.detail_genres(),
            image = card.image_url,
            description = card.description,
            label = if *in_wishlist {
                wishlist_label(true)
            } else {
                "Add to Wishlist"
            },
        ),
        DetailOutcome::Failed(_) => DETAIL_LOAD_FAILED.to_string(),
    }
}

pub fn format_wishlist(outcome: &WishlistOutcome) -> String {
    match outcome {
        WishlistOutcome::Empty => WISHLIST_EMPTY.to_string(),
        WishlistOutcome::Failed(_) => WISHLIST_LOAD_FAILED.to_string(),
        WishlistOutcome::Loaded(records) => records
            .iter()
            .map(|r| format!("{}\n    Remove from Wishlist", format_card(r, true)))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}
