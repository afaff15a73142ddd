pub mod tantivy_utils;
pub mod index;

pub use index::Bm25Engine;
