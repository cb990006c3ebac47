use crate::{BookId, BookRecord};

pub const PLACEHOLDER_IMAGE: &str = "placeholder.jpg";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NO_DESCRIPTION: &str = "No description available";

/// Display-ready view of a [`BookRecord`], with every optional field resolved
/// to its fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct BookCard {
    pub id: BookId,
    pub title: String,
    pub image_url: String,
    /// All author names, comma separated
    pub authors: String,
    /// First author only (detail view)
    pub primary_author: String,
    subjects: Option<String>,
    pub description: String,
}

impl BookCard {
    pub fn from_record(record: &BookRecord) -> Self {
        let names: Vec<&str> = record.authors.iter().map(|a| a.name.as_str()).collect();
        let authors = if names.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            names.join(", ")
        };
        let primary_author = names
            .first()
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        let subjects = (!record.subjects.is_empty()).then(|| record.subjects.join(", "));

        Self {
            id: record.id,
            title: record.title.clone(),
            image_url: record.image_url().unwrap_or(PLACEHOLDER_IMAGE).to_string(),
            authors,
            primary_author,
            subjects,
            description: record
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }

    /// Genre line on listing cards
    pub fn card_genres(&self) -> &str {
        self.subjects.as_deref().unwrap_or("N/A")
    }

    /// Genre line on the detail page
    pub fn detail_genres(&self) -> &str {
        self.subjects.as_deref().unwrap_or("No genres available")
    }
}

impl From<&BookRecord> for BookCard {
    fn from(record: &BookRecord) -> Self {
        Self::from_record(record)
    }
}
