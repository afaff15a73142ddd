//! Radial placement of a [`KnowledgeGraph`] for rendering.

use std::f64::consts::TAU;

use serde::Serialize;

use lexcap_core::config::GraphSettings;

use crate::types::KnowledgeGraph;

pub const PLACEHOLDER_ID: &str = "default";
pub const PLACEHOLDER_LABEL: &str = "Select a document to explore connections";

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlacedNode {
    pub id: String,
    pub label: String,
    /// Item type, or `info` for the placeholder.
    pub kind: String,
    pub is_center: bool,
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlacedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub animated: bool,
    pub stroke: &'static str,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphLayout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<PlacedEdge>,
}

/// Center node at `(center_x, center_y)`, node `i > 0` at angle
/// `(i - 1) / (n - 1)` of a full turn and distance `radius * size / 20`.
/// An empty graph becomes a single placeholder node.
pub fn layout(graph: &KnowledgeGraph, settings: &GraphSettings) -> GraphLayout {
    let center = Position { x: settings.center_x, y: settings.center_y };
    if graph.is_empty() {
        return GraphLayout {
            nodes: vec![PlacedNode {
                id: PLACEHOLDER_ID.to_string(),
                label: PLACEHOLDER_LABEL.to_string(),
                kind: "info".to_string(),
                is_center: true,
                position: center,
            }],
            edges: Vec::new(),
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let spokes = (graph.nodes.len() - 1) as f64;
    let nodes = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let position = if i == 0 {
                center
            } else {
                #[allow(clippy::cast_precision_loss)]
                let angle = (i - 1) as f64 / spokes * TAU;
                let distance = settings.radius * f64::from(node.size) / 20.0;
                Position { x: center.x + angle.cos() * distance, y: center.y + angle.sin() * distance }
            };
            PlacedNode {
                id: node.id.clone(),
                label: node.label.replacen("...", "", 1),
                kind: node.item_type.to_string(),
                is_center: i == 0,
                position,
            }
        })
        .collect();

    let edges = graph
        .edges
        .iter()
        .map(|edge| PlacedEdge {
            id: format!("{}-{}", edge.source, edge.target),
            source: edge.source.clone(),
            target: edge.target.clone(),
            animated: edge.weight > 0.7,
            stroke: edge.kind.stroke(),
            stroke_width: (edge.weight * 3.0).max(1.0),
        })
        .collect();

    GraphLayout { nodes, edges }
}
