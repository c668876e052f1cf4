use crate::error::FetchError;
use crate::headers::RequestHeaders;
use crate::result::FetchedPage;
use reqwest::Client;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Anything that can turn a URL into a raw page.
pub trait PageFetcher {
    fn fetch(
        &self,
        url: &str,
        headers: &RequestHeaders,
    ) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(10))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout / 2)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, headers: &RequestHeaders) -> Result<FetchedPage, FetchError> {
        Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = headers
            .apply(self.client.get(url))
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        let response_time = start.elapsed();

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let content_length = response.content_length();

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        debug!(
            "Fetched {} ({} bytes, {:?}) in {:?}",
            url,
            body.len(),
            content_type,
            response_time
        );

        Ok(FetchedPage {
            url: url.to_string(),
            status_code: status.as_u16(),
            content_type,
            content_length,
            response_time,
            body,
        })
    }
}
