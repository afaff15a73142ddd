use std::collections::HashMap;

use anyhow::Result;
use lexcap_core::traits::KnowledgeSearch;
use lexcap_core::types::SearchResult;

/// Runs two engines on the same query and merges their results by item id.
pub struct HybridSearch<P, S> where P: KnowledgeSearch, S: KnowledgeSearch {
    primary: P,
    secondary: S,
}

impl<P, S> HybridSearch<P, S> where P: KnowledgeSearch, S: KnowledgeSearch {
    pub fn new(primary: P, secondary: S) -> Self { Self { primary, secondary } }

    pub fn query(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        let first = self.primary.search(query, k)?;
        let second = self.secondary.search(query, k)?;
        tracing::debug!(query, primary = self.primary.name(), primary_hits = first.len(), secondary = self.secondary.name(), secondary_hits = second.len(), "hybrid search");
        Ok(merge(first, second, k))
    }
}

/// Merge two ranked lists: one entry per id with the better score, reasons and
/// concepts of both unioned. The result is sorted by score and truncated to `k`.
pub fn merge(first: Vec<SearchResult>, second: Vec<SearchResult>, k: usize) -> Vec<SearchResult> {
    let mut merged: Vec<SearchResult> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();
    for hit in first.into_iter().chain(second) {
        match by_id.get(&hit.item.id) {
            Some(&pos) => {
                let old = &mut merged[pos];
                let (winner, loser) = if hit.semantic_score > old.semantic_score { (hit, old.clone()) } else { (old.clone(), hit) };
                *old = absorb(winner, loser);
            }
            None => {
                by_id.insert(hit.item.id.clone(), merged.len());
                merged.push(hit);
            }
        }
    }
    merged.sort_by(|a, b| b.semantic_score.partial_cmp(&a.semantic_score).unwrap_or(std::cmp::Ordering::Equal));
    merged.truncate(k);
    merged
}

fn absorb(mut winner: SearchResult, loser: SearchResult) -> SearchResult {
    for c in loser.matched_concepts { if !winner.matched_concepts.contains(&c) { winner.matched_concepts.push(c); } }
    for r in loser.semantic_reasons { if !winner.semantic_reasons.contains(&r) { winner.semantic_reasons.push(r); } }
    winner
}

impl<P, S> KnowledgeSearch for HybridSearch<P, S> where P: KnowledgeSearch, S: KnowledgeSearch {
    fn name(&self) -> &'static str { "hybrid" }
    fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> { self.query(query, limit) }
}
