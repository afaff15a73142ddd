//! Ordered step-list builder.
//!
//! Steps are kept in a `Vec` whose positions are the step orders; every
//! mutation renumbers so `steps[i].order == i` always holds.

use std::fmt::Write as _;

use crate::error::{Result, WorkflowError};
use crate::export::{ExportedStep, StepListExport};
use crate::types::{WorkflowNode, WorkflowStep, WorkflowTemplate};
use crate::UNTITLED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Empty,
    HasSteps,
}

/// A palette node being dragged over the list.
#[derive(Debug, Clone)]
struct DragSession {
    node: WorkflowNode,
    over: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct StepListBuilder {
    name: String,
    steps: Vec<WorkflowStep>,
    drag: Option<DragSession>,
    next_id: u64,
}

impl Default for StepListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StepListBuilder {
    pub fn new() -> Self {
        Self { name: UNTITLED.to_string(), steps: Vec::new(), drag: None, next_id: 1 }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn state(&self) -> BuilderState {
        if self.steps.is_empty() {
            BuilderState::Empty
        } else {
            BuilderState::HasSteps
        }
    }

    /// Add a copy of `node` at the end. Returns the new step id.
    pub fn append(&mut self, node: &WorkflowNode) -> String {
        self.insert_at(self.steps.len(), node)
    }

    /// Insert a copy of `node` at `index` (clamped to the list length).
    pub fn insert_at(&mut self, index: usize, node: &WorkflowNode) -> String {
        let step = self.new_step(node);
        let id = step.id.clone();
        let index = index.min(self.steps.len());
        self.steps.insert(index, step);
        self.renumber();
        id
    }

    pub fn begin_drag(&mut self, node: &WorkflowNode) {
        self.drag = Some(DragSession { node: node.clone(), over: None });
    }

    /// Record the slot currently hovered. Ignored without an active drag.
    pub fn drag_over(&mut self, index: usize) {
        if let Some(drag) = self.drag.as_mut() {
            drag.over = Some(index);
        }
    }

    /// Slot highlighted by the active drag, if any.
    pub fn drop_target(&self) -> Option<usize> {
        self.drag.as_ref().and_then(|d| d.over)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Finish the drag by inserting its node at `index`. A drop without an
    /// active drag does nothing and returns `None`.
    pub fn drop(&mut self, index: usize) -> Option<String> {
        let drag = self.drag.take()?;
        Some(self.insert_at(index, &drag.node))
    }

    /// Move an existing step to `index` (clamped).
    pub fn move_step(&mut self, id: &str, index: usize) -> Result<()> {
        let from = self.position(id)?;
        let step = self.steps.remove(from);
        let index = index.min(self.steps.len());
        self.steps.insert(index, step);
        self.renumber();
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<WorkflowStep> {
        let at = self.position(id)?;
        let step = self.steps.remove(at);
        self.renumber();
        Ok(step)
    }

    /// Replace the whole list with the template's nodes, in template order.
    pub fn load_template(&mut self, template: &WorkflowTemplate) {
        self.steps.clear();
        self.drag = None;
        for node in &template.nodes {
            let step = WorkflowStep { id: self.fresh_id("step"), node: node.clone(), order: 0 };
            self.steps.push(step);
        }
        self.renumber();
        self.name.clone_from(&template.name);
        tracing::debug!(template = %template.id, steps = self.steps.len(), "loaded template into step list");
    }

    pub fn clear(&mut self) {
        self.steps.clear();
        self.drag = None;
        self.name = UNTITLED.to_string();
    }

    /// Human-readable run summary: the name followed by numbered step labels.
    pub fn run(&self) -> Result<String> {
        if self.steps.is_empty() {
            return Err(WorkflowError::EmptyWorkflow);
        }
        let mut out = format!("Running workflow: {}\n\nSteps:", self.name);
        for (i, step) in self.steps.iter().enumerate() {
            let _ = write!(out, "\n{}. {}", i + 1, step.node.label);
        }
        Ok(out)
    }

    pub fn export(&self, timestamp: &str) -> Result<StepListExport> {
        if self.steps.is_empty() {
            return Err(WorkflowError::EmptyWorkflow);
        }
        Ok(StepListExport {
            name: self.name.clone(),
            timestamp: timestamp.to_string(),
            steps: self
                .steps
                .iter()
                .map(|s| ExportedStep {
                    order: s.order,
                    node_type: s.node.node_type.clone(),
                    label: s.node.label.clone(),
                    category: s.node.category,
                    description: s.node.description.clone(),
                })
                .collect(),
        })
    }

    fn new_step(&mut self, node: &WorkflowNode) -> WorkflowStep {
        let mut node = node.clone();
        node.id = self.fresh_id("node");
        WorkflowStep { id: self.fresh_id("step"), node, order: 0 }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.steps
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| WorkflowError::UnknownStep(id.to_string()))
    }

    fn renumber(&mut self) {
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.order = i;
        }
    }
}
