//! Shared test helpers: an in-memory catalog with call recording, failure
//! injection and gates for holding a request open.
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use folio_common::{BookId, BookRecord, Page};
use tokio::sync::Notify;

use crate::catalog::{FetchError, RemoteCatalog};

/// Holds one request open. `started` fires when the request begins;
/// the request completes after `release` is notified.
#[derive(Default)]
pub struct Gate {
    pub started: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct MockCatalog {
    pages: HashMap<u32, Page>,
    records: HashMap<BookId, BookRecord>,
    failing_pages: Mutex<HashSet<u32>>,
    failing_records: Mutex<HashSet<BookId>>,
    page_gates: Mutex<HashMap<u32, Arc<Gate>>>,
    record_gates: Mutex<HashMap<BookId, Arc<Gate>>>,
    page_calls: Mutex<Vec<u32>>,
    record_calls: Mutex<Vec<BookId>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: Page) -> Self {
        for record in &page.records {
            self.records.insert(record.id, record.clone());
        }
        self.pages.insert(page.page_number, page);
        self
    }

    pub fn with_record(mut self, record: BookRecord) -> Self {
        self.records.insert(record.id, record);
        self
    }

    pub fn fail_page(&self, page_number: u32) {
        self.failing_pages.lock().unwrap().insert(page_number);
    }

    pub fn heal_page(&self, page_number: u32) {
        self.failing_pages.lock().unwrap().remove(&page_number);
    }

    pub fn fail_record(&self, id: BookId) {
        self.failing_records.lock().unwrap().insert(id);
    }

    pub fn gate_page(&self, page_number: u32) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.page_gates
            .lock()
            .unwrap()
            .insert(page_number, gate.clone());
        gate
    }

    pub fn gate_record(&self, id: BookId) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.record_gates.lock().unwrap().insert(id, gate.clone());
        gate
    }

    pub fn page_calls(&self) -> Vec<u32> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn record_calls(&self) -> Vec<BookId> {
        self.record_calls.lock().unwrap().clone()
    }
}

async fn pass_gate(gate: Option<Arc<Gate>>) {
    if let Some(gate) = gate {
        gate.started.notify_one();
        gate.release.notified().await;
    }
}

#[async_trait]
impl RemoteCatalog for MockCatalog {
    async fn fetch_page(&self, page_number: u32) -> Result<Page, FetchError> {
        self.page_calls.lock().unwrap().push(page_number);
        let gate = self.page_gates.lock().unwrap().get(&page_number).cloned();
        pass_gate(gate).await;

        let url = format!("mock://books/?page={page_number}");
        if self.failing_pages.lock().unwrap().contains(&page_number) {
            return Err(FetchError::Status { status: 500, url });
        }
        self.pages
            .get(&page_number)
            .cloned()
            .ok_or(FetchError::Status { status: 404, url })
    }

    async fn fetch_by_id(&self, id: BookId) -> Result<BookRecord, FetchError> {
        self.record_calls.lock().unwrap().push(id);
        let gate = self.record_gates.lock().unwrap().get(&id).cloned();
        pass_gate(gate).await;

        let url = format!("mock://books/{id}/");
        if self.failing_records.lock().unwrap().contains(&id) {
            return Err(FetchError::Status { status: 500, url });
        }
        self.records
            .get(&id)
            .cloned()
            .ok_or(FetchError::Status { status: 404, url })
    }
}

pub fn book(id: BookId, title: &str, subjects: &[&str]) -> BookRecord {
    BookRecord {
        id,
        title: title.to_string(),
        authors: Vec::new(),
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
        bookshelves: Vec::new(),
        languages: Vec::new(),
        formats: HashMap::new(),
        description: None,
        download_count: None,
    }
}

/// A page in a catalog of `last_page` pages; cursors follow integer paging.
pub fn page(page_number: u32, last_page: u32, records: Vec<BookRecord>) -> Page {
    Page {
        page_number,
        records,
        next: (page_number < last_page).then(|| format!("mock://books/?page={}", page_number + 1)),
        previous: (page_number > 1).then(|| format!("mock://books/?page={}", page_number - 1)),
    }
}
