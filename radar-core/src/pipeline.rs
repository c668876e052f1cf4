use crate::aggregate::{AggregateOptions, AggregateProgressCallback, enrich_hits};
use crate::detect::EntityDetector;
use crate::graph::{GraphBuilder, StarGraph};
use crate::layout::{DEFAULT_RADIUS, Scene, arrange};
use crate::model::SearchHit;
use chrono::{DateTime, Utc};
use radar_scanner::{PageFetcher, QueryExecutor};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Whole-run failures. Per-page failures never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RadarError {
    #[error("no search keyword given")]
    EmptyQuery,

    #[error("no results for '{keyword}'")]
    SearchUnavailable { keyword: String },
}

pub struct RadarOptions {
    pub keyword: String,
    pub max_results: usize,
    pub radius: f64,
    pub aggregate: AggregateOptions,
}

impl RadarOptions {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            max_results: DEFAULT_MAX_RESULTS,
            radius: DEFAULT_RADIUS,
            aggregate: AggregateOptions::default(),
        }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct RadarRun {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub graph: StarGraph,
    pub scene: Scene,
}

impl RadarRun {
    pub fn keyword(&self) -> &str {
        self.graph.keyword()
    }

    pub fn hits(&self) -> &[SearchHit] {
        self.graph.hits()
    }
}

/// Trimmed keyword, or [`RadarError::EmptyQuery`] when nothing is left.
pub fn validate_keyword(raw: &str) -> Result<String, RadarError> {
    let keyword = raw.trim();
    if keyword.is_empty() {
        return Err(RadarError::EmptyQuery);
    }
    Ok(keyword.to_string())
}

/// Search, enrich every hit, build the star and lay it out.
pub async fn execute_radar<Q: QueryExecutor, F: PageFetcher>(
    options: RadarOptions,
    executor: &Q,
    fetcher: &F,
    detector: &EntityDetector,
    progress_callback: Option<AggregateProgressCallback>,
) -> Result<RadarRun, RadarError> {
    let RadarOptions {
        keyword,
        max_results,
        radius,
        aggregate,
    } = options;

    let keyword = validate_keyword(&keyword)?;
    let started_at = Utc::now();

    let raw_hits = match executor
        .search(&keyword, max_results, &aggregate.headers)
        .await
    {
        Ok(hits) => hits,
        Err(e) => {
            warn!("Search for '{}' failed: {}", keyword, e);
            Vec::new()
        }
    };

    if raw_hits.is_empty() {
        return Err(RadarError::SearchUnavailable { keyword });
    }

    if let Some(ref callback) = progress_callback {
        callback(format!("Found {} results.", raw_hits.len()));
    }

    let hits = enrich_hits(raw_hits, fetcher, detector, &aggregate, progress_callback).await;
    let graph = GraphBuilder::new(detector.table()).build(&keyword, hits);
    let scene = arrange(&graph, radius);

    info!(
        "Built star graph for '{}': {} nodes, {} edges",
        keyword,
        graph.node_count(),
        graph.edge_count()
    );

    Ok(RadarRun {
        run_id: Uuid::new_v4(),
        started_at,
        finished_at: Utc::now(),
        graph,
        scene,
    })
}
