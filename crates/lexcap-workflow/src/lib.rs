//! lexcap-workflow
//!
//! Workflow builders for legal process automation: a node palette with
//! built-in templates, an ordered step-list builder, a free-form canvas with
//! click-to-connect linking, and one-way JSON export of either.

pub mod canvas;
pub mod error;
pub mod export;
pub mod palette;
pub mod steps;
pub mod types;

pub use canvas::{CanvasBuilder, ClickOutcome, ConnectMode};
pub use error::{Result, WorkflowError};
pub use palette::Palette;
pub use steps::{BuilderState, StepListBuilder};
pub use types::{NodeCategory, Position, WorkflowConnection, WorkflowNode, WorkflowStep, WorkflowTemplate};

/// Name given to new and cleared workflows.
pub const UNTITLED: &str = "Untitled Workflow";
