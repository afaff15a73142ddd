use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Field, Value};
use tantivy::snippet::{Snippet, SnippetGenerator};
use tantivy::{doc, Index, IndexReader, TantivyDocument};

use lexcap_core::config::SearchSettings;
use lexcap_core::traits::KnowledgeSearch;
use lexcap_core::types::{is_actionable_query, KnowledgeItem, SearchResult, SourceKind};
use lexcap_core::KnowledgeBase;

use crate::tantivy_utils::{build_schema, query_terms, register_tokenizer};

const SNIPPET_CHARS: usize = 180;

/// BM25 ranking over an in-RAM tantivy index of the knowledge base.
pub struct Bm25Engine {
	base: Arc<KnowledgeBase>,
	settings: SearchSettings,
	index: Index,
	reader: IndexReader,
	id_field: Field,
	title_field: Field,
	body_field: Field,
	tags_field: Field,
	category_field: Field,
	jurisdiction_field: Field,
}

impl Bm25Engine {
	pub fn build(base: Arc<KnowledgeBase>, settings: SearchSettings) -> Result<Self> {
		let started = Instant::now();
		let schema = build_schema();
		let index = Index::create_in_ram(schema.clone());
		register_tokenizer(&index);
		let id_field = schema.get_field("id")?;
		let title_field = schema.get_field("title")?;
		let body_field = schema.get_field("body")?;
		let tags_field = schema.get_field("tags")?;
		let category_field = schema.get_field("category")?;
		let jurisdiction_field = schema.get_field("jurisdiction")?;

		let mut index_writer = index.writer(50_000_000)?;
		for item in base.items() {
			index_writer.add_document(doc!(
				id_field => item.id.clone(),
				title_field => item.title.clone(),
				body_field => format!("{}\n{}", item.summary, item.content),
				tags_field => item.tags.join(", "),
				category_field => item.category.clone(),
				jurisdiction_field => item.jurisdiction.clone().unwrap_or_default(),
			))?;
		}
		index_writer.commit()?;
		let reader = index.reader()?;
		tracing::info!(docs = base.len(), elapsed_ms = started.elapsed().as_millis() as u64, "built bm25 index");

		Ok(Self { base, settings, index, reader, id_field, title_field, body_field, tags_field, category_field, jurisdiction_field })
	}

	pub fn search_top(&self, query_text: &str, limit: usize) -> Result<Vec<SearchResult>> {
		if !is_actionable_query(query_text, self.settings.min_query_len) || limit == 0 { return Ok(Vec::new()); }
		let terms = query_terms(query_text);
		if terms.is_empty() { return Ok(Vec::new()); }
		let started = Instant::now();
		let searcher = self.reader.searcher();
		let mut parser = QueryParser::for_index(&self.index, vec![self.title_field, self.body_field, self.tags_field, self.category_field, self.jurisdiction_field]);
		parser.set_field_boost(self.title_field, 2.0);
		parser.set_field_boost(self.tags_field, 1.5);
		let (query, errors) = parser.parse_query_lenient(query_text);
		if !errors.is_empty() { tracing::debug!(query = query_text, errors = errors.len(), "lenient query parse dropped clauses"); }

		let top_docs = searcher.search(&*query, &TopDocs::with_limit(limit))?;
		let Some(top_score) = top_docs.first().map(|(s, _)| *s).filter(|s| *s > 0.0) else { return Ok(Vec::new()); };
		let mut snippets = SnippetGenerator::create(&searcher, &*query, self.body_field)?;
		snippets.set_max_num_chars(SNIPPET_CHARS);

		let mut results = Vec::with_capacity(top_docs.len());
		for (score, addr) in top_docs {
			let doc: TantivyDocument = searcher.doc(addr)?;
			let id = doc.get_first(self.id_field).and_then(|v| v.as_str()).unwrap_or("");
			let Some(item) = self.base.get(id) else { tracing::warn!(id, "indexed id missing from knowledge base"); continue; };
			let semantic_score = (score / top_score).min(self.settings.score_cap);
			if semantic_score <= self.settings.min_score { continue; }
			let highlight = mark_snippet(&snippets.snippet_from_doc(&doc));
			let matched_concepts = matched_terms(item, &terms);
			let semantic_reasons = matched_concepts.iter().map(|t| format!("Keyword match: \"{t}\"")).collect();
			results.push(SearchResult {
				item: item.clone(),
				matched_query: query_text.to_string(),
				semantic_score,
				highlights: if highlight.is_empty() { vec![item.summary.clone()] } else { vec![highlight] },
				matched_concepts,
				semantic_reasons,
				source: SourceKind::Text,
			});
		}
		tracing::debug!(query = query_text, hits = results.len(), elapsed_ms = started.elapsed().as_millis() as u64, "bm25 search");
		Ok(results)
	}
}

/// Snippet fragment with highlighted ranges wrapped in `**`.
fn mark_snippet(snippet: &Snippet) -> String {
	let text = snippet.fragment();
	let mut out = String::with_capacity(text.len() + 8);
	let mut last = 0;
	for range in snippet.highlighted() {
		if range.start < last { continue; }
		out.push_str(text.get(last..range.start).unwrap_or_default());
		out.push_str("**");
		out.push_str(text.get(range.clone()).unwrap_or_default());
		out.push_str("**");
		last = range.end;
	}
	out.push_str(text.get(last..).unwrap_or_default());
	out.trim().to_string()
}

fn matched_terms(item: &KnowledgeItem, terms: &[String]) -> Vec<String> {
	let haystack = format!("{} {} {} {} {} {}", item.title, item.summary, item.content, item.tags.join(" "), item.category, item.jurisdiction.as_deref().unwrap_or("")).to_lowercase();
	terms.iter().filter(|t| haystack.contains(String::as_str(t))).cloned().collect()
}

impl KnowledgeSearch for Bm25Engine {
	fn name(&self) -> &'static str { "bm25" }

	fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<SearchResult>> { self.search_top(query, limit) }
}
