// Shared fakes for the pipeline integration tests

#![allow(dead_code)]

use radar_scanner::{
    FetchError, FetchedPage, PageFetcher, QueryExecutor, RawHit, RequestHeaders, ScanError,
};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone)]
pub enum FakePage {
    Html(String),
    Typed { content_type: String, body: String },
    Timeout,
    NotFound,
}

#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, FakePage>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_html(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), FakePage::Html(html.to_string()));
        self
    }

    pub fn with_page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str, _headers: &RequestHeaders) -> Result<FetchedPage, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());

        match self.pages.get(url).cloned() {
            Some(FakePage::Html(body)) => {
                Ok(FetchedPage::new(url.to_string(), body).with_content_type("text/html; charset=utf-8"))
            }
            Some(FakePage::Typed { content_type, body }) => {
                Ok(FetchedPage::new(url.to_string(), body).with_content_type(content_type))
            }
            Some(FakePage::Timeout) => Err(FetchError::Timeout(url.to_string())),
            Some(FakePage::NotFound) | None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

pub struct FakeSearch {
    hits: Vec<RawHit>,
    fail: bool,
}

impl FakeSearch {
    pub fn returning(hits: Vec<RawHit>) -> Self {
        Self { hits, fail: false }
    }

    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            hits: Vec::new(),
            fail: true,
        }
    }
}

impl QueryExecutor for FakeSearch {
    async fn search(
        &self,
        _query: &str,
        max_results: usize,
        _headers: &RequestHeaders,
    ) -> Result<Vec<RawHit>, ScanError> {
        if self.fail {
            return Err(ScanError::SearchStatus {
                status: 503,
                url: "https://www.bing.com/search".to_string(),
            });
        }
        Ok(self.hits.iter().take(max_results).cloned().collect())
    }
}

pub fn hit(n: usize, title: &str) -> RawHit {
    RawHit::new(title, format!("https://example.com/{}", n), format!("snippet {}", n))
}
