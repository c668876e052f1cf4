use crate::detect::{Entities, EntityDetector};
use crate::model::SearchHit;
use crate::normalize::normalize_page;
use indicatif::{ProgressBar, ProgressStyle};
use radar_scanner::{PageFetcher, RawHit, RequestHeaders};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause between two successive page fetches.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(1000);

/// Options for enriching a batch of search hits
pub struct AggregateOptions {
    pub headers: RequestHeaders,
    /// Fixed pause between fetches, applied after failures too
    pub delay: Duration,
    pub show_progress_bar: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            headers: RequestHeaders::random(),
            delay: DEFAULT_REQUEST_DELAY,
            show_progress_bar: false,
        }
    }
}

/// Callback for reporting aggregation progress
pub type AggregateProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Fetch, normalize and scan one page. Any failure becomes the sentinel mapping.
pub async fn analyze_page<F: PageFetcher>(
    url: &str,
    fetcher: &F,
    detector: &EntityDetector,
    headers: &RequestHeaders,
) -> Entities {
    let page = match fetcher.fetch(url, headers).await {
        Ok(page) => page,
        Err(e) => {
            warn!("Fetch failed for {}: {}", url, e);
            return Entities::inaccessible();
        }
    };

    match normalize_page(&page) {
        Ok(text) => {
            let entities = detector.detect(&text);
            debug!(
                "{}: {} chars analyzed, {} categories",
                url,
                text.chars().count(),
                entities.len()
            );
            entities
        }
        Err(e) => {
            warn!("Cannot analyze {}: {}", url, e);
            Entities::inaccessible()
        }
    }
}

/// Enrich every hit in order, one fetch at a time.
pub async fn enrich_hits<F: PageFetcher>(
    hits: Vec<RawHit>,
    fetcher: &F,
    detector: &EntityDetector,
    options: &AggregateOptions,
    progress_callback: Option<AggregateProgressCallback>,
) -> Vec<SearchHit> {
    let total = hits.len();

    let progress_bar = if options.show_progress_bar {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message("Analyzing pages...");
        Some(pb)
    } else {
        None
    };

    let mut enriched = Vec::with_capacity(total);

    for (idx, raw) in hits.into_iter().enumerate() {
        if idx > 0 && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }

        if let Some(ref callback) = progress_callback {
            callback(format!("Analyzing {}/{}: {}", idx + 1, total, raw.url));
        }
        if let Some(ref pb) = progress_bar {
            pb.set_message(raw.url.clone());
        }

        let entities = analyze_page(&raw.url, fetcher, detector, &options.headers).await;
        enriched.push(SearchHit::new(raw, entities));

        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }
    }

    let inaccessible = enriched.iter().filter(|hit| !hit.is_accessible()).count();
    info!(
        "Analyzed {} pages ({} not accessible)",
        enriched.len(),
        inaccessible
    );

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Analysis complete! {} pages, {} not accessible",
            enriched.len(),
            inaccessible
        ));
    }

    enriched
}
