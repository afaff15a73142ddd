//! Schema and analyzer shared by the BM25 index.
use tantivy::schema::{Schema, TextFieldIndexing, TextOptions, IndexRecordOption, STRING, STORED};
use tantivy::tokenizer::{TextAnalyzer, SimpleTokenizer, LowerCaser, StopWordFilter};
use tantivy::Index;

pub const TOKENIZER: &str = "legal_text";

pub const STOP_WORDS: &[&str] = &[
	"a","an","and","are","as","at","be","by","for","from","has","he","in","is","it","its","of","on","that","the","to","was","will","with","or","but","not","this","these","they","them","their","there","then","than","so","if","when","where","why","how","what","which","who","whom","whose","can","could","should","would","may","might","must","shall","do","does","did","have","had","having",
];

pub fn build_schema() -> Schema {
	let mut schema_builder = Schema::builder();
	let _id_field = schema_builder.add_text_field("id", STRING | STORED);
	let indexing = TextFieldIndexing::default().set_tokenizer(TOKENIZER).set_index_option(IndexRecordOption::WithFreqsAndPositions);
	let stored_text = TextOptions::default().set_indexing_options(indexing.clone()).set_stored();
	let plain_text = TextOptions::default().set_indexing_options(indexing);
	let _title_field = schema_builder.add_text_field("title", stored_text.clone());
	let _body_field = schema_builder.add_text_field("body", stored_text);
	let _tags_field = schema_builder.add_text_field("tags", plain_text.clone());
	let _category_field = schema_builder.add_text_field("category", plain_text.clone());
	let _jurisdiction_field = schema_builder.add_text_field("jurisdiction", plain_text);
	schema_builder.build()
}

pub fn register_tokenizer(index: &Index) {
	let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(LowerCaser)
		.filter(StopWordFilter::remove(STOP_WORDS.iter().map(|s| s.to_string())))
		.build();
	index.tokenizers().register(TOKENIZER, tokenizer);
}

/// Lowercased alphanumeric query words minus stop words, in order, deduplicated.
pub fn query_terms(query: &str) -> Vec<String> {
	let mut terms: Vec<String> = Vec::new();
	for word in query.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
		let w = word.to_lowercase();
		if !STOP_WORDS.contains(&w.as_str()) && !terms.contains(&w) { terms.push(w); }
	}
	terms
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn query_terms_drop_stop_words_and_punctuation() {
		assert_eq!(query_terms("The MAC-clause, and the MAC!"), vec!["mac", "clause"]);
	}

	#[test]
	fn schema_has_searchable_fields() {
		let schema = build_schema();
		for name in ["id", "title", "body", "tags", "category", "jurisdiction"] { assert!(schema.get_field(name).is_ok(), "{name}"); }
	}
}
