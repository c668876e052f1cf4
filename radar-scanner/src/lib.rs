pub mod error;
pub mod fetcher;
pub mod headers;
pub mod result;
pub mod search;

pub use error::{FetchError, ScanError};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use headers::RequestHeaders;
pub use result::{FetchedPage, RawHit};
pub use search::{BingSearch, QueryExecutor, parse_results};
