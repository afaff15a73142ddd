//! lexcap-graph
//!
//! Relationship graph around one knowledge item: explicit related items, then
//! items sharing its practice area, then items by the same author. `layout`
//! places the result on a radial canvas for rendering.

pub mod builder;
pub mod layout;
pub mod types;

pub use builder::GraphBuilder;
pub use layout::{layout, GraphLayout};
pub use types::{EdgeKind, KnowledgeEdge, KnowledgeGraph, KnowledgeNode, NodeRole};
