// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    SearchArgs, expand_path, pattern_listing, read_keyword, report_path, summarize_run,
};

// Re-export the pipeline from radar-core
pub use radar_core::pipeline::{RadarError, RadarOptions, RadarRun, execute_radar};
