// Report generation for a finished radar run

use crate::graph::NodeKind;
use crate::layout::Scene;
use crate::model::SearchHit;
use crate::pipeline::RadarRun;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const THIN_RULE: &str = "────────────────────────────────────────────────────────────────────────────────";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Dot,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "dot" | "graphviz" => Some(ReportFormat::Dot),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Dot => "dot",
        }
    }
}

/// Hits per category, in order of first appearance across the run.
pub fn category_counts(hits: &[SearchHit]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for hit in hits.iter().filter(|hit| hit.is_accessible()) {
        for category in hit.entities.categories() {
            match counts.iter_mut().find(|(name, _)| name == category) {
                Some((_, count)) => *count += 1,
                None => counts.push((category.to_string(), 1)),
            }
        }
    }
    counts
}

pub fn render_report(run: &RadarRun, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(run)),
        ReportFormat::Json => generate_json_report(run),
        ReportFormat::Dot => Ok(generate_dot_report(run.keyword(), &run.scene)),
    }
}

pub fn generate_text_report(run: &RadarRun) -> String {
    let hits = run.hits();
    let inaccessible = hits.iter().filter(|hit| !hit.is_accessible()).count();

    let mut report = String::new();

    report.push_str(RULE);
    report.push('\n');
    report.push_str(&format!("                         CRAWLER RADAR: {}\n", run.keyword()));
    report.push_str(RULE);
    report.push_str("\n\n");

    report.push_str(&format!("Run ID:         {}\n", run.run_id));
    report.push_str(&format!(
        "Date:           {}\n",
        run.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    let duration = run.finished_at - run.started_at;
    report.push_str(&format!("Duration:       {} seconds\n", duration.num_seconds()));
    report.push_str(&format!("Results:        {}\n", hits.len()));
    report.push_str(&format!("Not accessible: {}\n", inaccessible));
    report.push('\n');

    report.push_str(RULE);
    report.push_str("\nDEVICES\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    let counts = category_counts(hits);
    if counts.is_empty() {
        report.push_str("  No devices detected\n");
    } else {
        for (category, count) in &counts {
            report.push_str(&format!(
                "  {:<14} {} page{}\n",
                category,
                count,
                if *count == 1 { "" } else { "s" }
            ));
        }
    }
    report.push('\n');

    report.push_str(RULE);
    report.push_str("\nRESULTS\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    for (idx, hit) in hits.iter().enumerate() {
        report.push_str(&format!("[{}] {}\n", idx + 1, hit.title));
        report.push_str(&format!("URL:      {}\n", hit.url));
        report.push_str(&format!("Devices:  {}\n", describe_entities(hit)));

        if !hit.snippet.is_empty() {
            report.push('\n');
            report.push_str(&wrap_text(&hit.snippet, 80, "  "));
        }

        report.push('\n');
        report.push_str(THIN_RULE);
        report.push_str("\n\n");
    }

    report
}

fn describe_entities(hit: &SearchHit) -> String {
    if !hit.is_accessible() {
        return "page not accessible".to_string();
    }
    if hit.entities.is_empty() {
        return "none detected".to_string();
    }
    hit.entities
        .iter()
        .map(|(category, matches)| format!("{} ({})", category, matches.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn generate_json_report(run: &RadarRun) -> Result<String, serde_json::Error> {
    let hits = run.hits();
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Radar",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "run": {
                "id": run.run_id,
                "keyword": run.keyword(),
                "started_at": run.started_at.to_rfc3339(),
                "finished_at": run.finished_at.to_rfc3339(),
            },
            "summary": {
                "total_results": hits.len(),
                "not_accessible": hits.iter().filter(|hit| !hit.is_accessible()).count(),
                "categories": category_counts(hits)
                    .into_iter()
                    .map(|(category, pages)| serde_json::json!({ "category": category, "pages": pages }))
                    .collect::<Vec<_>>()
            },
            "hits": hits,
            "graph": run.scene
        }
    });

    serde_json::to_string_pretty(&json_report)
}

/// Graphviz rendering with pinned positions (`neato -n` keeps them).
pub fn generate_dot_report(keyword: &str, scene: &Scene) -> String {
    let mut dot = String::new();
    dot.push_str(&format!("graph \"{}\" {{\n", escape_dot(keyword)));
    dot.push_str("  node [style=filled, fontsize=10];\n");
    dot.push_str("  edge [color=gray];\n");

    for (idx, node) in scene.nodes.iter().enumerate() {
        let shape = match node.kind {
            NodeKind::Center => "doublecircle",
            NodeKind::Leaf => "ellipse",
        };
        dot.push_str(&format!(
            "  n{} [label=\"{}\", fillcolor=\"{}\", shape={}, pos=\"{:.3},{:.3}!\"];\n",
            idx,
            escape_dot(&node.label),
            escape_dot(&node.color),
            shape,
            node.position.x,
            node.position.y
        ));
    }

    for edge in &scene.edges {
        dot.push_str(&format!("  n{} -- n{};\n", edge.center, edge.leaf));
    }

    dot.push_str("}\n");
    dot
}

fn escape_dot(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.len() + word.len() + 1 > width - indent.len() && !current_line.is_empty() {
            result.push_str(indent);
            result.push_str(&current_line);
            result.push('\n');
            current_line.clear();
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        result.push_str(indent);
        result.push_str(&current_line);
        result.push('\n');
    }

    result
}
