pub mod aggregate;
pub mod detect;
pub mod graph;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod patterns;
pub mod pipeline;
pub mod report;

use colored::Colorize;

pub use aggregate::{AggregateOptions, AggregateProgressCallback, analyze_page, enrich_hits};
pub use detect::{Entities, EntityDetector, detect_entities};
pub use graph::{GraphBuilder, GraphNode, NodeKind, StarGraph};
pub use layout::{Point, Scene, SceneNode, arrange, circular_layout};
pub use model::SearchHit;
pub use normalize::{NormalizeError, normalize_page};
pub use patterns::{EntityPattern, PatternError, PatternTable};
pub use pipeline::{RadarError, RadarOptions, RadarRun, execute_radar, validate_keyword};
pub use report::ReportFormat;

const BANNER: &str = r#"
   ▄████████    ▄████████ ████████▄     ▄████████    ▄████████
  ███    ███   ███    ███ ███   ▀███   ███    ███   ███    ███
  ███    ███   ███    ███ ███    ███   ███    ███   ███    ███
 ▄███▄▄▄▄██▀   ███    ███ ███    ███   ███    ███  ▄███▄▄▄▄██▀
▀▀███▀▀▀▀▀   ▀███████████ ███    ███ ▀███████████ ▀▀███▀▀▀▀▀
▀███████████   ███    ███ ███    ███   ███    ███ ▀███████████
  ███    ███   ███    ███ ███   ▄███   ███    ███   ███    ███
  ███    ███   ███    █▀  ████████▀    ███    █▀    ███    ███
  ███    ███                                        ███    ███
"#;

pub fn print_banner() {
    eprintln!("{}", BANNER.bright_cyan());
    eprintln!(
        "  {} {}\n",
        "device radar".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
