use std::time::Duration;

use async_trait::async_trait;
use folio_common::{BookId, BookRecord, Page};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{FetchError, RemoteCatalog};
use crate::config::Config;

/// Client for the Gutendex API (Project Gutenberg metadata).
pub struct GutendexClient {
    base_url: String,
    http: reqwest::Client,
}

// -- Response envelope --

#[derive(Debug, Deserialize)]
struct PageResponse {
    #[allow(dead_code)]
    #[serde(default)]
    count: Option<u64>,
    next: Option<String>,
    previous: Option<String>,
    #[serde(default)]
    results: Vec<BookRecord>,
}

impl PageResponse {
    fn into_page(self, page_number: u32) -> Page {
        Page {
            page_number,
            records: self.results,
            next: self.next,
            previous: self.previous,
        }
    }
}

impl GutendexClient {
    pub fn new(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::new(&config.api_base_url, http))
    }

    fn page_url(&self, page_number: u32) -> String {
        format!("{}/?page={}", self.base_url, page_number)
    }

    fn book_url(&self, id: BookId) -> String {
        format!("{}/{}/", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        resp.json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RemoteCatalog for GutendexClient {
    async fn fetch_page(&self, page_number: u32) -> Result<Page, FetchError> {
        let url = self.page_url(page_number);
        let response: PageResponse = self.get_json(&url).await?;
        Ok(response.into_page(page_number))
    }

    async fn fetch_by_id(&self, id: BookId) -> Result<BookRecord, FetchError> {
        let url = self.book_url(id);
        self.get_json(&url).await
    }
}
