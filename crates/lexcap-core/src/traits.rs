use crate::types::SearchResult;

/// A ranked search over the knowledge base.
///
/// Implementations return at most `limit` results ordered by non-increasing
/// `semantic_score`. A query that matches nothing yields an empty list.
pub trait KnowledgeSearch: Send + Sync {
    fn name(&self) -> &'static str;
    fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<SearchResult>>;
}
