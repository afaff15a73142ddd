//! lexcap-search
//!
//! Keyword and synonym scorer over the knowledge base. Query terms are expanded
//! through a fixed legal concept table, every item gets an additive score from
//! title, body, tag, jurisdiction, category and author matches, and the best
//! sentences are returned as highlights.

pub mod highlight;
pub mod scorer;
pub mod synonyms;

pub use scorer::SemanticScorer;
pub use synonyms::ConceptMap;
