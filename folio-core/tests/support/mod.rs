use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use folio_common::{BookId, BookRecord, Page};
use folio_core::{FetchError, RemoteCatalog};

/// Initialize tracing for tests with proper test output handling
#[allow(dead_code)]
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// Catalog of `pages` pages with `per_page` records each. Record ids start
/// at 1 and are numbered across pages. Every call is recorded.
pub struct FakeCatalog {
    pages: HashMap<u32, Page>,
    failing_ids: HashSet<BookId>,
    pub page_calls: Mutex<Vec<u32>>,
    pub record_calls: Mutex<Vec<BookId>>,
}

const SUBJECTS: [&str; 3] = ["Adventure stories", "Poetry", "Science fiction"];

impl FakeCatalog {
    pub fn new(pages: u32, per_page: u32) -> Self {
        let mut map = HashMap::new();
        for n in 1..=pages {
            let records = (0..per_page)
                .map(|i| {
                    let id = u64::from((n - 1) * per_page + i + 1);
                    record(id, &format!("Volume {id}"), &[SUBJECTS[id as usize % 3]])
                })
                .collect();
            map.insert(
                n,
                Page {
                    page_number: n,
                    records,
                    next: (n < pages).then(|| format!("https://catalog.test/?page={}", n + 1)),
                    previous: (n > 1).then(|| format!("https://catalog.test/?page={}", n - 1)),
                },
            );
        }
        Self {
            pages: map,
            failing_ids: HashSet::new(),
            page_calls: Mutex::new(Vec::new()),
            record_calls: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn failing(mut self, id: BookId) -> Self {
        self.failing_ids.insert(id);
        self
    }

    pub fn page_calls(&self) -> Vec<u32> {
        self.page_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteCatalog for FakeCatalog {
    async fn fetch_page(&self, page_number: u32) -> Result<Page, FetchError> {
        self.page_calls.lock().unwrap().push(page_number);
        self.pages
            .get(&page_number)
            .cloned()
            .ok_or(FetchError::Status {
                status: 404,
                url: format!("https://catalog.test/?page={page_number}"),
            })
    }

    async fn fetch_by_id(&self, id: BookId) -> Result<BookRecord, FetchError> {
        self.record_calls.lock().unwrap().push(id);
        let url = format!("https://catalog.test/{id}/");
        if self.failing_ids.contains(&id) {
            return Err(FetchError::Status { status: 503, url });
        }
        self.pages
            .values()
            .flat_map(|p| p.records.iter())
            .find(|r| r.id == id)
            .cloned()
            .ok_or(FetchError::Status { status: 404, url })
    }
}

pub fn record(id: BookId, title: &str, subjects: &[&str]) -> BookRecord {
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
