use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable catalog identifier of a book.
pub type BookId = u64;

/// Content type under which the catalog publishes cover images.
pub const IMAGE_JPEG: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
}

/// One book as delivered by the remote catalog. Never mutated after fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    /// Genre/topic tags. Order is whatever the catalog sent; treated as a set.
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub bookshelves: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    /// Content type -> download URL
    #[serde(default)]
    pub formats: HashMap<String, String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub download_count: Option<u64>,
}

impl BookRecord {
    pub fn image_url(&self) -> Option<&str> {
        self.formats.get(IMAGE_JPEG).map(String::as_str)
    }

    /// Exact, case-sensitive subject match.
    pub fn has_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }
}

/// One batch of records plus the pagination cursors the catalog returned.
///
/// Cursors are opaque (the catalog sends URLs); only their presence matters.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub page_number: u32,
    pub records: Vec<BookRecord>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl Page {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.previous.is_some()
    }
}
