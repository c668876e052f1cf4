// Circular layout for the star graph

use crate::graph::{GraphEdge, NodeKind, StarGraph};
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};

pub const DEFAULT_RADIUS: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircularLayout {
    pub center: Point,
    pub leaves: Vec<Point>,
}

/// Angle of leaf `index` among `leaf_count` leaves.
pub fn leaf_angle(index: usize, leaf_count: usize) -> f64 {
    TAU * index as f64 / leaf_count as f64 - FRAC_PI_2
}

/// Leaf 0 sits at 12 o'clock and the rest run clockwise. Points are in a y-up
/// plane: `(r·cos θ, -r·sin θ)`.
pub fn circular_layout(leaf_count: usize, radius: f64) -> CircularLayout {
    let leaves = (0..leaf_count)
        .map(|index| {
            let angle = leaf_angle(index, leaf_count);
            Point {
                x: radius * angle.cos(),
                y: -radius * angle.sin(),
            }
        })
        .collect();

    CircularLayout {
        center: Point::ORIGIN,
        leaves,
    }
}

/// What a renderer needs for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub label: String,
    pub kind: NodeKind,
    pub size: u32,
    pub color: String,
    pub position: Point,
}

/// Positioned nodes (center first) and center-leaf edges as node indices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub radius: f64,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<GraphEdge>,
}

impl Scene {
    pub fn center(&self) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.kind == NodeKind::Center)
    }

    pub fn leaves(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|node| node.kind == NodeKind::Leaf)
    }
}

pub fn arrange(graph: &StarGraph, radius: f64) -> Scene {
    let layout = circular_layout(graph.leaf_count(), radius);
    let mut leaf_points = layout.leaves.into_iter();

    let nodes = graph
        .nodes()
        .map(|node| {
            let position = match node.kind {
                NodeKind::Center => layout.center,
                NodeKind::Leaf => leaf_points.next().unwrap_or(Point::ORIGIN),
            };
            SceneNode {
                label: node.label.clone(),
                kind: node.kind,
                size: node.size,
                color: node.color.clone(),
                position,
            }
        })
        .collect();

    Scene {
        radius,
        nodes,
        edges: graph.edges().collect(),
    }
}
