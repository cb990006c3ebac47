use std::collections::BTreeSet;

use crate::BookRecord;

/// Text + genre filter applied over one page of records.
///
/// Text matches titles case-insensitively as a substring. Genre matches a
/// subject exactly; `None` means all genres.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub text: String,
    pub genre: Option<String>,
}

impl ListingFilter {
    /// An empty genre string is the "All Genres" choice and normalizes to `None`.
    pub fn new(text: impl Into<String>, genre: Option<&str>) -> Self {
        Self {
            text: text.into(),
            genre: genre.filter(|g| !g.is_empty()).map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.genre.is_none()
    }

    pub fn matches(&self, record: &BookRecord) -> bool {
        self.matches_title(record, &self.text.to_lowercase()) && self.matches_genre(record)
    }

    /// Keep every matching record, in page order.
    pub fn apply(&self, records: &[BookRecord]) -> Vec<BookRecord> {
        let needle = self.text.to_lowercase();
        records
            .iter()
            .filter(|r| self.matches_title(r, &needle) && self.matches_genre(r))
            .cloned()
            .collect()
    }

    fn matches_title(&self, record: &BookRecord, needle: &str) -> bool {
        needle.is_empty() || record.title.to_lowercase().contains(needle)
    }

    fn matches_genre(&self, record: &BookRecord) -> bool {
        match &self.genre {
            Some(genre) => record.has_subject(genre),
            None => true,
        }
    }
}

/// Distinct subjects across `records`, case-sensitive, sorted ascending.
pub fn derive_genres(records: &[BookRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.subjects.iter())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
