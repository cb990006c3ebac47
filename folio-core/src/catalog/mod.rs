//! Remote catalog access

mod gutendex;
mod lookup;

pub use gutendex::GutendexClient;
pub use lookup::RecordLookup;

use async_trait::async_trait;
use folio_common::{BookId, BookRecord, Page};

/// The one failure kind for remote calls.
///
/// `Clone` so a single shared in-flight result can be handed to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Paginated book source. The trait is async and mockable for testing.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// Fetch one page of records plus its forward/backward cursors.
    async fn fetch_page(&self, page_number: u32) -> Result<Page, FetchError>;

    /// Fetch a single record by id.
    async fn fetch_by_id(&self, id: BookId) -> Result<BookRecord, FetchError>;
}
