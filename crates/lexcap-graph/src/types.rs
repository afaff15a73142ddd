use serde::{Deserialize, Serialize};

use lexcap_core::types::{ItemId, ItemType};

/// Why a node was placed in the graph. Decides size and label length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Center,
    Related,
    Category,
    Author,
}

impl NodeRole {
    pub fn size(self) -> u32 {
        match self {
            NodeRole::Center => 30,
            NodeRole::Related => 20,
            NodeRole::Category => 15,
            NodeRole::Author => 12,
        }
    }

    /// Number of title characters kept in the label.
    pub fn label_chars(self) -> usize {
        match self {
            NodeRole::Center => 50,
            NodeRole::Related => 40,
            NodeRole::Category | NodeRole::Author => 35,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeNode {
    pub id: ItemId,
    pub label: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub size: u32,
    pub role: NodeRole,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Related,
    Category,
    Author,
}

impl EdgeKind {
    pub fn weight(self) -> f64 {
        match self {
            EdgeKind::Related => 1.0,
            EdgeKind::Category => 0.5,
            EdgeKind::Author => 0.3,
        }
    }

    /// Stroke color used when the edge is drawn.
    pub fn stroke(self) -> &'static str {
        match self {
            EdgeKind::Related => "#059669",
            EdgeKind::Category => "#10b981",
            EdgeKind::Author => "#6ee7b7",
        }
    }

    pub fn role(self) -> NodeRole {
        match self {
            EdgeKind::Related => NodeRole::Related,
            EdgeKind::Category => NodeRole::Category,
            EdgeKind::Author => NodeRole::Author,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeEdge {
    pub source: ItemId,
    pub target: ItemId,
    pub weight: f64,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// Nodes in placement order (center first) and edges from the center.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeGraph {
    pub nodes: Vec<KnowledgeNode>,
    pub edges: Vec<KnowledgeEdge>,
}

impl KnowledgeGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn center(&self) -> Option<&KnowledgeNode> {
        self.nodes.first()
    }
}
