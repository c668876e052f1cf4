// Tests for star-graph construction and circular layout

use radar_core::detect::Entities;
use radar_core::graph::{
    CENTER_COLOR, CENTER_SIZE, DEFAULT_LEAF_COLOR, GraphBuilder, LEAF_SIZE, NodeKind,
};
use radar_core::layout::{DEFAULT_RADIUS, arrange};
use radar_core::model::SearchHit;
use radar_core::patterns::{EntityPattern, PatternTable};
use radar_scanner::RawHit;

fn search_hit(n: usize, title: &str, entities: Entities) -> SearchHit {
    SearchHit::new(
        RawHit::new(title, format!("https://example.com/{}", n), ""),
        entities,
    )
}

fn devices(pairs: &[(&str, &str)]) -> Entities {
    pairs
        .iter()
        .map(|(category, matched)| (*category, vec![matched.to_string()]))
        .collect()
}

#[test]
fn test_star_shape() {
    let hits: Vec<SearchHit> = (1..=6)
        .map(|n| search_hit(n, "Title", Entities::new()))
        .collect();

    let graph = GraphBuilder::new(PatternTable::builtin()).build("phones", hits);

    assert_eq!(graph.node_count(), 7);
    assert_eq!(graph.edge_count(), 6);
    assert_eq!(graph.degree(0), 6);
    for idx in 1..=6 {
        assert_eq!(graph.degree(idx), 1);
    }
    for edge in graph.edges() {
        assert_eq!(edge.center, 0);
    }
}

#[test]
fn test_center_node() {
    let graph = GraphBuilder::new(PatternTable::builtin()).build("best phones", Vec::new());
    let center = graph.center();

    assert_eq!(center.label, "best phones");
    assert_eq!(center.kind, NodeKind::Center);
    assert_eq!(center.color, CENTER_COLOR);
    assert_eq!(center.size, CENTER_SIZE);
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_leaf_labels_and_sizes() {
    let hits = vec![
        search_hit(1, "Short", Entities::new()),
        search_hit(2, "A considerably longer title than twenty", Entities::new()),
    ];

    let graph = GraphBuilder::new(PatternTable::builtin()).build("phones", hits);
    let leaves: Vec<_> = graph.leaves().collect();

    assert_eq!(leaves[0].label, "1. Short");
    assert_eq!(leaves[1].label, "2. A considerably longe...");
    assert!(leaves.iter().all(|leaf| leaf.size == LEAF_SIZE));
    assert!(leaves.iter().all(|leaf| leaf.kind == NodeKind::Leaf));
}

#[test]
fn test_leaf_colors() {
    let hits = vec![
        search_hit(1, "Apple", devices(&[("iPhone", "iphone 15")])),
        search_hit(2, "Mixed", devices(&[("Pixel", "pixel 8"), ("iPhone", "iphone 13")])),
        search_hit(3, "Nothing", Entities::new()),
        search_hit(4, "Broken", Entities::inaccessible()),
    ];

    let graph = GraphBuilder::new(PatternTable::builtin()).build("phones", hits);
    let colors: Vec<&str> = graph.leaves().map(|leaf| leaf.color.as_str()).collect();

    assert_eq!(
        colors,
        vec!["lightcoral", "mediumseagreen", DEFAULT_LEAF_COLOR, DEFAULT_LEAF_COLOR]
    );
}

#[test]
fn test_custom_table_colors() {
    let table = PatternTable::new(vec![
        EntityPattern::new("Kindle", r"\bkindle\s?\w*", "gold").unwrap(),
    ])
    .unwrap();
    let hits = vec![search_hit(1, "Readers", devices(&[("Kindle", "kindle paperwhite")]))];

    let graph = GraphBuilder::new(&table).build("e-readers", hits);

    assert_eq!(graph.leaves().next().unwrap().color, "gold");
}

#[test]
fn test_hit_lookup() {
    let hits = vec![search_hit(1, "First", Entities::new()), search_hit(2, "Second", Entities::new())];
    let graph = GraphBuilder::new(PatternTable::builtin()).build("phones", hits);

    let second = graph.leaves().nth(1).unwrap();
    assert_eq!(graph.hit_for(second).unwrap().title, "Second");
    assert!(graph.hit_for(graph.center()).is_none());
}

#[test]
fn test_layout_four_leaves() {
    let hits: Vec<SearchHit> = (1..=4)
        .map(|n| search_hit(n, "Title", Entities::new()))
        .collect();
    let graph = GraphBuilder::new(PatternTable::builtin()).build("phones", hits);

    let scene = arrange(&graph, DEFAULT_RADIUS);
    let positions: Vec<(f64, f64)> = scene
        .leaves()
        .map(|leaf| (leaf.position.x, leaf.position.y))
        .collect();
    let expected = [(0.0, 3.5), (3.5, 0.0), (0.0, -3.5), (-3.5, 0.0)];

    assert_eq!(positions.len(), 4);
    for ((x, y), (ex, ey)) in positions.iter().zip(expected.iter()) {
        assert!((x - ex).abs() < 1e-9, "x {} vs {}", x, ex);
        assert!((y - ey).abs() < 1e-9, "y {} vs {}", y, ey);
    }

    let center = scene.center().unwrap();
    assert_eq!((center.position.x, center.position.y), (0.0, 0.0));
    assert_eq!(scene.edges.len(), 4);
}

#[test]
fn test_layout_keeps_labels_and_colors() {
    let hits = vec![search_hit(1, "Apple", devices(&[("iPhone", "iphone 15")]))];
    let graph = GraphBuilder::new(PatternTable::builtin()).build("phones", hits);

    let scene = arrange(&graph, DEFAULT_RADIUS);

    assert_eq!(scene.nodes[0].label, "phones");
    assert_eq!(scene.nodes[1].label, "1. Apple");
    assert_eq!(scene.nodes[1].color, "lightcoral");
}
