//! Free-form canvas builder with click-to-connect linking.
//!
//! Connection mode is a small state machine: `start_connect` arms it with a
//! source node, the next click on a different node creates the connection and
//! disarms it, and `Escape` or `cancel_connect` disarms it without changes.
//! Cycles and dangling connections are not checked.

use crate::error::{Result, WorkflowError};
use crate::export::{CanvasExport, ExportedConnection, ExportedNode};
use crate::types::{Position, WorkflowConnection, WorkflowNode, WorkflowTemplate};
use crate::UNTITLED;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectMode {
    #[default]
    Idle,
    ConnectingFrom(String),
}

/// What a node click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(String),
    Connected(String),
    /// A connection with the same source and target already existed.
    AlreadyConnected,
    /// The connection source itself was clicked.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct CanvasBuilder {
    name: String,
    nodes: Vec<WorkflowNode>,
    connections: Vec<WorkflowConnection>,
    mode: ConnectMode,
    selected: Option<String>,
    next_id: u64,
}

impl Default for CanvasBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasBuilder {
    pub fn new() -> Self {
        Self {
            name: UNTITLED.to_string(),
            nodes: Vec::new(),
            connections: Vec::new(),
            mode: ConnectMode::Idle,
            selected: None,
            next_id: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn nodes(&self) -> &[WorkflowNode] {
        &self.nodes
    }

    pub fn connections(&self) -> &[WorkflowConnection] {
        &self.connections
    }

    pub fn mode(&self) -> &ConnectMode {
        &self.mode
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Place a copy of a palette node at `position`. Returns the new node id.
    pub fn drop_node(&mut self, node: &WorkflowNode, position: Position) -> String {
        let mut placed = node.clone();
        placed.id = self.fresh_node_id();
        placed.position = Some(position);
        let id = placed.id.clone();
        self.nodes.push(placed);
        id
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> Result<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| WorkflowError::UnknownNode(id.to_string()))?;
        node.position = Some(position);
        Ok(())
    }

    pub fn start_connect(&mut self, source: &str) -> Result<()> {
        self.require_node(source)?;
        self.mode = ConnectMode::ConnectingFrom(source.to_string());
        Ok(())
    }

    pub fn click_node(&mut self, id: &str) -> Result<ClickOutcome> {
        self.require_node(id)?;
        let source = match &self.mode {
            ConnectMode::Idle => {
                self.selected = Some(id.to_string());
                return Ok(ClickOutcome::Selected(id.to_string()));
            }
            ConnectMode::ConnectingFrom(source) if source == id => return Ok(ClickOutcome::Ignored),
            ConnectMode::ConnectingFrom(source) => source.clone(),
        };
        self.mode = ConnectMode::Idle;

        if self.connections.iter().any(|c| c.source == source && c.target == id) {
            return Ok(ClickOutcome::AlreadyConnected);
        }
        let conn_id = self.fresh_connection_id(&source, id);
        self.connections.push(WorkflowConnection {
            id: conn_id.clone(),
            source,
            target: id.to_string(),
            label: None,
        });
        tracing::debug!(connection = %conn_id, "created connection");
        Ok(ClickOutcome::Connected(conn_id))
    }

    pub fn cancel_connect(&mut self) {
        self.mode = ConnectMode::Idle;
    }

    /// Keyboard handling: `Escape` leaves connection mode.
    pub fn on_key(&mut self, key: &str) {
        if key == "Escape" && self.mode != ConnectMode::Idle {
            self.cancel_connect();
        }
    }

    /// Remove the selected node together with every connection touching it.
    pub fn delete_selected(&mut self) -> Option<WorkflowNode> {
        let id = self.selected.take()?;
        let at = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(at);
        self.connections.retain(|c| c.source != id && c.target != id);
        if self.mode == ConnectMode::ConnectingFrom(id) {
            self.mode = ConnectMode::Idle;
        }
        Some(node)
    }

    /// Returns whether a connection was removed.
    pub fn delete_connection(&mut self, id: &str) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c.id != id);
        self.connections.len() != before
    }

    pub fn load_template(&mut self, template: &WorkflowTemplate) {
        self.nodes.clone_from(&template.nodes);
        self.connections.clone_from(&template.connections);
        self.name.clone_from(&template.name);
        self.selected = None;
        self.mode = ConnectMode::Idle;
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
        self.selected = None;
        self.name = UNTITLED.to_string();
        self.mode = ConnectMode::Idle;
    }

    pub fn run(&self) -> Result<String> {
        if self.nodes.is_empty() {
            return Err(WorkflowError::EmptyWorkflow);
        }
        Ok(format!(
            "Running workflow: {}\n\nThis would execute the workflow with {} nodes and {} connections.",
            self.name,
            self.nodes.len(),
            self.connections.len()
        ))
    }

    pub fn export(&self, timestamp: &str) -> Result<CanvasExport> {
        if self.nodes.is_empty() {
            return Err(WorkflowError::EmptyWorkflow);
        }
        Ok(CanvasExport {
            name: self.name.clone(),
            timestamp: timestamp.to_string(),
            nodes: self
                .nodes
                .iter()
                .map(|n| ExportedNode {
                    id: n.id.clone(),
                    node_type: n.node_type.clone(),
                    label: n.label.clone(),
                    category: n.category,
                    position: n.position,
                    properties: n.properties.clone().unwrap_or_default(),
                })
                .collect(),
            connections: self
                .connections
                .iter()
                .map(|c| ExportedConnection {
                    id: c.id.clone(),
                    source: c.source.clone(),
                    target: c.target.clone(),
                    label: c.label.clone(),
                })
                .collect(),
        })
    }

    fn require_node(&self, id: &str) -> Result<()> {
        if self.nodes.iter().any(|n| n.id == id) {
            Ok(())
        } else {
            Err(WorkflowError::UnknownNode(id.to_string()))
        }
    }

    /// Next `node-N` not already on the canvas (templates bring their own ids).
    fn fresh_node_id(&mut self) -> String {
        loop {
            let id = format!("node-{}", self.next_id);
            self.next_id += 1;
            if !self.nodes.iter().any(|n| n.id == id) {
                return id;
            }
        }
    }

    fn fresh_connection_id(&mut self, source: &str, target: &str) -> String {
        loop {
            let id = format!("{source}-{target}-{}", self.next_id);
            self.next_id += 1;
            if !self.connections.iter().any(|c| c.id == id) {
                return id;
            }
        }
    }
}
