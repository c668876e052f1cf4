// Star graph: the keyword at the center, one leaf per search hit

use crate::model::SearchHit;
use crate::patterns::PatternTable;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::fmt;

pub const TITLE_MAX_CHARS: usize = 20;
pub const ELLIPSIS: &str = "...";

pub const CENTER_COLOR: &str = "skyblue";
pub const DEFAULT_LEAF_COLOR: &str = "lightgray";
pub const CENTER_SIZE: u32 = 3000;
pub const LEAF_SIZE: u32 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Center,
    Leaf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub label: String,
    pub kind: NodeKind,
    pub size: u32,
    pub color: String,
    /// Index of the hit this leaf stands for
    pub hit: Option<usize>,
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Undirected center-leaf pair, as node positions in [`StarGraph::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub center: usize,
    pub leaf: usize,
}

#[derive(Debug, Clone)]
pub struct StarGraph {
    keyword: String,
    hits: Vec<SearchHit>,
    graph: UnGraph<GraphNode, ()>,
    center: NodeIndex,
}

impl StarGraph {
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    pub fn center(&self) -> &GraphNode {
        &self.graph[self.center]
    }

    /// Center first, then leaves in hit order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    pub fn leaves(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes().filter(|node| node.kind == NodeKind::Leaf)
    }

    pub fn edges(&self) -> impl Iterator<Item = GraphEdge> + '_ {
        self.graph.edge_references().map(move |edge| {
            let (a, b) = (edge.source(), edge.target());
            let (center, leaf) = if a == self.center { (a, b) } else { (b, a) };
            GraphEdge {
                center: center.index(),
                leaf: leaf.index(),
            }
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn leaf_count(&self) -> usize {
        self.node_count() - 1
    }

    /// Degree of the node at `index` in [`StarGraph::nodes`] order.
    pub fn degree(&self, index: usize) -> usize {
        self.graph.neighbors(NodeIndex::new(index)).count()
    }

    pub fn hit_for(&self, node: &GraphNode) -> Option<&SearchHit> {
        node.hit.and_then(|idx| self.hits.get(idx))
    }

}

/// Title cut to [`TITLE_MAX_CHARS`] characters with an ellipsis when longer.
pub fn truncate_title(title: &str) -> String {
    match title.char_indices().nth(TITLE_MAX_CHARS) {
        Some((byte_index, _)) => format!("{}{}", &title[..byte_index], ELLIPSIS),
        None => title.to_string(),
    }
}

/// `"{n}. {title}"` with a 1-based `n`.
pub fn leaf_label(position: usize, title: &str) -> String {
    format!("{}. {}", position, truncate_title(title))
}

pub struct GraphBuilder<'a> {
    table: &'a PatternTable,
}

impl<'a> GraphBuilder<'a> {
    /// `table` supplies the category colors.
    pub fn new(table: &'a PatternTable) -> Self {
        Self { table }
    }

    /// Color of the first detected category, or the default when there is none
    /// or the category has no color (the error sentinel).
    pub fn leaf_color(&self, hit: &SearchHit) -> String {
        hit.entities
            .first_category()
            .and_then(|category| self.table.color_for(category))
            .unwrap_or(DEFAULT_LEAF_COLOR)
            .to_string()
    }

    pub fn build(&self, keyword: &str, hits: Vec<SearchHit>) -> StarGraph {
        let mut graph = UnGraph::with_capacity(hits.len() + 1, hits.len());

        let center = graph.add_node(GraphNode {
            label: keyword.to_string(),
            kind: NodeKind::Center,
            size: CENTER_SIZE,
            color: CENTER_COLOR.to_string(),
            hit: None,
        });

        for (idx, hit) in hits.iter().enumerate() {
            let leaf = graph.add_node(GraphNode {
                label: leaf_label(idx + 1, &hit.title),
                kind: NodeKind::Leaf,
                size: LEAF_SIZE,
                color: self.leaf_color(hit),
                hit: Some(idx),
            });
            graph.add_edge(center, leaf, ());
        }

        StarGraph {
            keyword: keyword.to_string(),
            hits,
            graph,
            center,
        }
    }
}
