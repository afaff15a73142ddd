//! lexcap-core
//!
//! Shared domain types, the bundled knowledge base, layered configuration and
//! the traits implemented by the search engines.

pub mod config;
pub mod dataset;
pub mod error;
pub mod pacing;
pub mod traits;
pub mod types;

pub use dataset::KnowledgeBase;
pub use error::{Error, Result};
