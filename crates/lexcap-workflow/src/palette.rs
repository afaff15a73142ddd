//! Built-in node palette and workflow templates.

use crate::error::{Result, WorkflowError};
use crate::types::{NodeCategory, WorkflowNode, WorkflowTemplate};

const PALETTE: &str = include_str!("../data/palette.json");
const TEMPLATES: &str = include_str!("../data/templates.json");

#[derive(Debug, Clone)]
pub struct Palette {
    nodes: Vec<WorkflowNode>,
    templates: Vec<WorkflowTemplate>,
}

impl Palette {
    pub fn builtin() -> Result<Self> {
        let nodes = serde_json::from_str(PALETTE)
            .map_err(|source| WorkflowError::Dataset { name: "node palette", source })?;
        let templates = serde_json::from_str(TEMPLATES)
            .map_err(|source| WorkflowError::Dataset { name: "workflow templates", source })?;
        Ok(Self { nodes, templates })
    }

    pub fn nodes(&self) -> &[WorkflowNode] {
        &self.nodes
    }

    /// Palette entries of one category, or all of them for `None`.
    pub fn by_category(&self, category: Option<NodeCategory>) -> Vec<&WorkflowNode> {
        self.nodes
            .iter()
            .filter(|n| category.map_or(true, |c| n.category == c))
            .collect()
    }

    pub fn node(&self, id: &str) -> Result<&WorkflowNode> {
        self.nodes
            .iter()
            .find(|n| n.id == id || n.node_type == id)
            .ok_or_else(|| WorkflowError::UnknownNode(id.to_string()))
    }

    pub fn templates(&self) -> &[WorkflowTemplate] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Result<&WorkflowTemplate> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| WorkflowError::UnknownTemplate(id.to_string()))
    }
}
