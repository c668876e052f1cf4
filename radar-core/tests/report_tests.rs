// Tests for report generation functionality

use chrono::Utc;
use radar_core::detect::Entities;
use radar_core::graph::GraphBuilder;
use radar_core::layout::arrange;
use radar_core::model::SearchHit;
use radar_core::patterns::PatternTable;
use radar_core::pipeline::RadarRun;
use radar_core::report::{
    ReportFormat, category_counts, generate_dot_report, generate_json_report,
    generate_text_report, render_report, save_report,
};
use radar_scanner::RawHit;
use tempfile::TempDir;
use uuid::Uuid;

fn sample_run() -> RadarRun {
    let hits = vec![
        SearchHit::new(
            RawHit::new(
                "Best phones of the year",
                "https://example.com/best",
                "Our pick of the best smartphones you can buy right now",
            ),
            vec![
                ("iPhone", vec!["iphone 15".to_string()]),
                ("Samsung", vec!["galaxy s24".to_string()]),
            ]
            .into_iter()
            .collect(),
        ),
        SearchHit::new(
            RawHit::new("Pixel review", "https://example.com/pixel", ""),
            vec![("Pixel", vec!["pixel 8".to_string()])]
                .into_iter()
                .collect(),
        ),
        SearchHit::new(
            RawHit::new("Slow \"site\"", "https://example.com/slow", ""),
            Entities::inaccessible(),
        ),
        SearchHit::new(
            RawHit::new("Gardening", "https://example.com/garden", ""),
            Entities::new(),
        ),
    ];

    let graph = GraphBuilder::new(PatternTable::builtin()).build("best phones", hits);
    let scene = arrange(&graph, 3.5);
    let now = Utc::now();

    RadarRun {
        run_id: Uuid::new_v4(),
        started_at: now,
        finished_at: now,
        graph,
        scene,
    }
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("txt"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_str("Dot"), Some(ReportFormat::Dot));
    assert_eq!(ReportFormat::from_str("graphviz"), Some(ReportFormat::Dot));
    assert_eq!(ReportFormat::from_str("pdf"), None);
}

#[test]
fn test_report_format_extension() {
    assert_eq!(ReportFormat::Text.extension(), "txt");
    assert_eq!(ReportFormat::Json.extension(), "json");
    assert_eq!(ReportFormat::Dot.extension(), "dot");
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_category_counts_skip_inaccessible() {
    let run = sample_run();
    let counts = category_counts(run.hits());

    assert_eq!(
        counts,
        vec![
            ("iPhone".to_string(), 1),
            ("Samsung".to_string(), 1),
            ("Pixel".to_string(), 1)
        ]
    );
}

// ============================================================================
// Text Report Tests
// ============================================================================

#[test]
fn test_text_report_contents() {
    let run = sample_run();
    let report = generate_text_report(&run);

    assert!(report.contains("CRAWLER RADAR: best phones"));
    assert!(report.contains(&run.run_id.to_string()));
    assert!(report.contains("Results:        4"));
    assert!(report.contains("Not accessible: 1"));
    assert!(report.contains("[1] Best phones of the year"));
    assert!(report.contains("URL:      https://example.com/best"));
    assert!(report.contains("Devices:  iPhone (iphone 15); Samsung (galaxy s24)"));
    assert!(report.contains("Devices:  page not accessible"));
    assert!(report.contains("Devices:  none detected"));
    assert!(report.contains("Our pick of the best smartphones"));
}

#[test]
fn test_text_report_lists_hits_in_order() {
    let report = generate_text_report(&sample_run());

    let first = report.find("[1] Best phones").unwrap();
    let second = report.find("[2] Pixel review").unwrap();
    let fourth = report.find("[4] Gardening").unwrap();
    assert!(first < second && second < fourth);
}

// ============================================================================
// JSON Report Tests
// ============================================================================

#[test]
fn test_json_report_structure() {
    let run = sample_run();
    let json = generate_json_report(&run).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let report = &value["report"];

    assert_eq!(report["metadata"]["generator"], "Radar");
    assert_eq!(report["run"]["keyword"], "best phones");
    assert_eq!(report["run"]["id"], run.run_id.to_string());
    assert_eq!(report["summary"]["total_results"], 4);
    assert_eq!(report["summary"]["not_accessible"], 1);
    assert_eq!(report["hits"].as_array().unwrap().len(), 4);
    assert_eq!(report["hits"][0]["entities"]["iPhone"][0], "iphone 15");
    assert_eq!(report["hits"][2]["entities"]["Error"][0], "Page not accessible");
    assert_eq!(report["graph"]["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(report["graph"]["edges"].as_array().unwrap().len(), 4);
    assert_eq!(report["graph"]["nodes"][0]["kind"], "center");
}

#[test]
fn test_json_entities_keep_category_order() {
    let json = generate_json_report(&sample_run()).unwrap();
    let iphone = json.find("\"iPhone\"").unwrap();
    let samsung = json.find("\"Samsung\"").unwrap();
    assert!(iphone < samsung);
}

// ============================================================================
// DOT Report Tests
// ============================================================================

#[test]
fn test_dot_report() {
    let run = sample_run();
    let dot = generate_dot_report(run.keyword(), &run.scene);

    assert!(dot.starts_with("graph \"best phones\" {"));
    assert!(dot.contains("n0 [label=\"best phones\", fillcolor=\"skyblue\", shape=doublecircle"));
    assert!(dot.contains("n1 [label=\"1. Best phones of the y...\", fillcolor=\"lightcoral\""));
    assert!(dot.contains("pos=\"0.000,3.500!\""));
    assert!(dot.contains("label=\"3. Slow \\\"site\\\"\""));
    for leaf in 1..=4 {
        assert!(dot.contains(&format!("n0 -- n{};", leaf)));
    }
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn test_render_report_dispatch() {
    let run = sample_run();

    assert!(render_report(&run, ReportFormat::Text).unwrap().contains("RESULTS"));
    assert!(render_report(&run, ReportFormat::Json).unwrap().starts_with('{'));
    assert!(render_report(&run, ReportFormat::Dot).unwrap().starts_with("graph"));
}

// ============================================================================
// Save Tests
// ============================================================================

#[test]
fn test_save_report() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("radar.txt");
    let content = generate_text_report(&sample_run());

    save_report(&content, &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_save_report_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("radar.txt");

    assert!(save_report("content", &path).is_err());
}
