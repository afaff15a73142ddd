use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Workflow has no steps")]
    EmptyWorkflow,

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Unknown step: {0}")]
    UnknownStep(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Failed to parse {name}: {source}")]
    Dataset {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize workflow: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
