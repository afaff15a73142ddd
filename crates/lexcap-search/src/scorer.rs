use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use lexcap_core::config::SearchSettings;
use lexcap_core::traits::KnowledgeSearch;
use lexcap_core::types::{is_actionable_query, KnowledgeItem, SearchResult, SourceKind};
use lexcap_core::KnowledgeBase;

use crate::highlight;
use crate::synonyms::{push_unique, ConceptMap};

const FALLBACK_SCORE: f32 = 0.85;
const FALLBACK_LIMIT: usize = 5;

/// Additive keyword/synonym scorer.
pub struct SemanticScorer {
    base: Arc<KnowledgeBase>,
    concepts: ConceptMap,
    settings: SearchSettings,
}

/// Intermediate per-item tally before normalization.
struct Tally {
    score: u32,
    concepts: Vec<String>,
    reasons: Vec<String>,
}

impl SemanticScorer {
    pub fn new(base: Arc<KnowledgeBase>) -> Self {
        Self::with_settings(base, SearchSettings::default())
    }

    pub fn with_settings(base: Arc<KnowledgeBase>, settings: SearchSettings) -> Self {
        Self { base, concepts: ConceptMap::legal(), settings }
    }

    #[must_use]
    pub fn with_concepts(mut self, concepts: ConceptMap) -> Self {
        self.concepts = concepts;
        self
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Search with the configured result limit.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.search_top(query, self.settings.limit)
    }

    pub fn search_top(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        if !is_actionable_query(query, self.settings.min_query_len) {
            return Vec::new();
        }
        let started = Instant::now();
        let query_lower = query.to_lowercase();
        let terms: Vec<String> = query_lower.split_whitespace().map(str::to_string).collect();
        let expanded = self.concepts.expand(&terms);

        let mut results: Vec<SearchResult> = self
            .base
            .items()
            .iter()
            .filter_map(|item| self.score_item(item, query, &query_lower, &terms, &expanded))
            .collect();
        results.sort_by(|a, b| b.semantic_score.partial_cmp(&a.semantic_score).unwrap_or(Ordering::Equal));
        results.truncate(limit);

        if results.is_empty() && self.settings.demo_fallback && query_lower.contains("mac") {
            results = self.mac_fallback(query, limit);
        }

        tracing::debug!(
            query,
            expanded = expanded.len(),
            hits = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "semantic search"
        );
        results
    }

    fn score_item(
        &self,
        item: &KnowledgeItem,
        query: &str,
        query_lower: &str,
        terms: &[String],
        expanded: &[String],
    ) -> Option<SearchResult> {
        let tally = tally(item, query_lower, terms, expanded);
        #[allow(clippy::cast_precision_loss)]
        let semantic_score = (tally.score as f32 / self.settings.score_divisor).min(self.settings.score_cap);
        if semantic_score <= self.settings.min_score {
            return None;
        }

        let mut highlights = highlight::extract(&item.content, expanded, &tally.concepts);
        if highlights.is_empty() && tally.score > 0 {
            highlights.push(item.summary.clone());
        }

        Some(SearchResult {
            item: item.clone(),
            matched_query: query.to_string(),
            semantic_score,
            highlights,
            matched_concepts: tally.concepts,
            semantic_reasons: tally.reasons,
            source: SourceKind::Semantic,
        })
    }

    /// Items tagged or titled `MAC` at a fixed score. Only used when the query
    /// mentions "mac" and nothing else scored.
    fn mac_fallback(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.base
            .items()
            .iter()
            .filter(|i| i.tags.iter().any(|t| t == "MAC") || i.title.contains("MAC"))
            .take(FALLBACK_LIMIT.min(limit))
            .map(|item| SearchResult {
                item: item.clone(),
                matched_query: query.to_string(),
                semantic_score: FALLBACK_SCORE.min(self.settings.score_cap),
                highlights: vec![item.summary.clone()],
                matched_concepts: Vec::new(),
                semantic_reasons: Vec::new(),
                source: SourceKind::Semantic,
            })
            .collect()
    }
}

fn weight(term: &str, long: u32, short: u32) -> u32 {
    if term.chars().count() > 3 {
        long
    } else {
        short
    }
}

fn tally(item: &KnowledgeItem, query_lower: &str, terms: &[String], expanded: &[String]) -> Tally {
    let mut t = Tally { score: 0, concepts: Vec::new(), reasons: Vec::new() };

    let title = item.title.to_lowercase();
    for term in expanded {
        if title.contains(term.as_str()) {
            t.score += weight(term, 15, 8);
            push_unique(&mut t.concepts, term);
            if terms.contains(term) {
                t.reasons.push(format!("Direct match: \"{term}\" in title"));
            } else {
                t.reasons.push(format!("Semantic match: \"{term}\" related to query"));
            }
        }
    }

    let content = item.content.to_lowercase();
    let summary = item.summary.to_lowercase();
    for term in expanded {
        if content.contains(term.as_str()) {
            t.score += weight(term, 10, 5);
            push_unique(&mut t.concepts, term);
        }
        if summary.contains(term.as_str()) {
            t.score += weight(term, 12, 6);
            push_unique(&mut t.concepts, term);
        }
    }

    for tag in &item.tags {
        let tag_lower = tag.to_lowercase();
        for term in expanded {
            if tag_lower.contains(term.as_str()) || term.contains(tag_lower.as_str()) {
                t.score += 20;
                push_unique(&mut t.concepts, tag);
                t.reasons.push(format!("Tag match: \"{tag}\""));
            }
        }
    }

    if let Some(jurisdiction) = &item.jurisdiction {
        let jur = jurisdiction.to_lowercase();
        if (query_lower.contains("ny") || query_lower.contains("new york"))
            && (jur.contains("new york") || jur == "ny")
        {
            t.score += 25;
            t.reasons.push(format!("Jurisdiction: {jurisdiction}"));
        }
        for term in expanded {
            if jur.contains(term.as_str()) {
                t.score += 15;
                push_unique(&mut t.concepts, "jurisdiction");
            }
        }
    }

    let category = item.category.to_lowercase();
    for term in expanded {
        if category.contains(term.as_str()) {
            t.score += 12;
            push_unique(&mut t.concepts, &item.category);
            t.reasons.push(format!("Practice area: {}", item.category));
        }
    }

    if let Some(years) = item.author_years_experience.filter(|_| item.is_senior_author()) {
        t.score += 5;
        t.reasons.push(format!("Senior expertise: {years} years"));
    }

    t
}

impl KnowledgeSearch for SemanticScorer {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<SearchResult>> {
        Ok(self.search_top(query, limit))
    }
}
