use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Search returned HTTP {status} for {url}")]
    SearchStatus { status: u16, url: String },
}

/// Why a single page could not be fetched. Every variant means "not analyzable"
/// to the aggregator.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Timeout fetching: {0}")]
    Timeout(String),

    #[error("Connection failed for {url}: {message}")]
    Connection { url: String, message: String },

    #[error("HTTP {status} for: {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FetchError {
    /// Classify a transport error the way the fetcher reports it.
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout(url.to_string())
        } else if error.is_connect() {
            FetchError::Connection {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else {
            FetchError::Http(error)
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
