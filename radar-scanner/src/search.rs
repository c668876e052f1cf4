use crate::error::{Result, ScanError};
use crate::headers::RequestHeaders;
use crate::result::RawHit;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const BING_BASE_URL: &str = "https://www.bing.com";
const RESULTS_PER_PAGE: usize = 10;

/// Turns a keyword into an ordered list of hits.
pub trait QueryExecutor {
    fn search(
        &self,
        query: &str,
        max_results: usize,
        headers: &RequestHeaders,
    ) -> impl Future<Output = Result<Vec<RawHit>>> + Send;
}

/// Scrapes the Bing HTML results page.
pub struct BingSearch {
    client: Client,
    base_url: String,
}

impl BingSearch {
    pub fn new() -> Result<Self> {
        Self::with_base_url(BING_BASE_URL)
    }

    /// Point the scraper at another host (used against mock servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn page_url(&self, query: &str, first: usize) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/search", self.base_url))
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("first", &first.to_string());
        Ok(url)
    }
}

impl QueryExecutor for BingSearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        headers: &RequestHeaders,
    ) -> Result<Vec<RawHit>> {
        info!("Searching for '{}' (max {} results)", query, max_results);

        let mut hits: Vec<RawHit> = Vec::new();

        for first in (0..max_results).step_by(RESULTS_PER_PAGE) {
            let url = self.page_url(query, first)?;
            debug!("Requesting results page {}", url);

            let response = headers.apply(self.client.get(url.clone())).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ScanError::SearchStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let body = response.text().await?;
            let before = hits.len();
            for hit in parse_results(&body) {
                if !hits.iter().any(|existing| existing.url == hit.url) {
                    hits.push(hit);
                }
            }

            if hits.len() == before {
                debug!("Page at offset {} added nothing, stopping", first);
                break;
            }
        }

        hits.truncate(max_results);
        info!("Search for '{}' returned {} results", query, hits.len());
        Ok(hits)
    }
}

/// Extract (title, url, snippet) triples from a results page.
///
/// Reads `li.b_algo` result blocks; pages without them fall back to every
/// `h2 a` link with an empty snippet. Only absolute http(s) links survive.
pub fn parse_results(html: &str) -> Vec<RawHit> {
    let document = Html::parse_document(html);

    let block_selector = Selector::parse("li.b_algo").unwrap();
    let link_selector = Selector::parse("h2 a").unwrap();
    let snippet_selector = Selector::parse(".b_caption p").unwrap();

    let mut hits = Vec::new();

    for block in document.select(&block_selector) {
        let Some(link) = block.select(&link_selector).next() else {
            continue;
        };
        let snippet = block
            .select(&snippet_selector)
            .next()
            .map(|p| element_text(&p))
            .unwrap_or_default();
        if let Some(hit) = hit_from_link(&link, snippet) {
            hits.push(hit);
        }
    }

    if hits.is_empty() {
        for link in document.select(&link_selector) {
            if let Some(hit) = hit_from_link(&link, String::new()) {
                hits.push(hit);
            }
        }
    }

    hits
}

fn hit_from_link(link: &ElementRef, snippet: String) -> Option<RawHit> {
    let href = link.value().attr("href")?;
    if !is_web_link(href) {
        return None;
    }
    Some(RawHit::new(element_text(link), href, snippet))
}

fn is_web_link(href: &str) -> bool {
    Url::parse(href)
        .map(|u| u.scheme() == "http" || u.scheme() == "https")
        .unwrap_or(false)
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}
