use std::sync::Arc;

use lexcap_core::config::SearchSettings;
use lexcap_core::traits::KnowledgeSearch;
use lexcap_core::types::SourceKind;
use lexcap_core::KnowledgeBase;
use lexcap_text::Bm25Engine;

fn engine() -> Bm25Engine {
    let base = Arc::new(KnowledgeBase::bundled().expect("bundled"));
    Bm25Engine::build(base, SearchSettings::default()).expect("build index")
}

#[test]
fn bm25_full_flow() {
    let engine = engine();
    for q in ["earnout", "clawback", "franchise"] {
        let results = engine.search_top(q, 10).expect("search");
        eprintln!("q='{}' -> {} hits", q, results.len());
        assert!(!results.is_empty(), "{q}");
        assert!(results.windows(2).all(|w| w[0].semantic_score >= w[1].semantic_score));
        assert!(results.iter().all(|r| r.semantic_score <= 0.99 && r.source == SourceKind::Text));
    }
}

#[test]
fn distinctive_title_word_finds_item() {
    let results = engine().search_top("Clawback", 5).unwrap();
    assert_eq!(results[0].item.id, "kb-014");
    assert!((results[0].semantic_score - 0.99).abs() < 1e-6);
    assert!(results[0].matched_concepts.contains(&"clawback".to_string()));
}

#[test]
fn highlights_mark_matched_words() {
    let results = engine().search_top("earnout disputes", 3).unwrap();
    let hit = results.iter().find(|r| r.item.id == "kb-003").expect("kb-003");
    assert_eq!(hit.highlights.len(), 1);
    assert!(hit.highlights[0].contains("**"));
}

#[test]
fn invalid_syntax_does_not_fail() {
    let results = engine().search_top("earnout (", 5).unwrap();
    assert!(results.iter().any(|r| r.item.id == "kb-003"));
}

#[test]
fn short_or_unmatched_queries_are_empty() {
    let engine = engine();
    assert!(engine.search_top("ip", 5).unwrap().is_empty());
    assert!(engine.search_top("qwxzv", 5).unwrap().is_empty());
}

#[test]
fn queries_without_content_words_are_empty() {
    let engine = engine();
    for q in ["the and of", "what should they", "AND OR NOT"] {
        let results = engine.search_top(q, 20).expect("search");
        assert!(results.is_empty(), "q='{}' -> {} hits", q, results.len());
    }
    let engine: Box<dyn KnowledgeSearch> = Box::new(engine);
    assert!(engine.search("The AND of", 20).unwrap().is_empty());
}

#[test]
fn limit_is_respected_through_trait() {
    let engine: Box<dyn KnowledgeSearch> = Box::new(engine());
    assert_eq!(engine.name(), "bm25");
    let results = engine.search("due diligence", 2).unwrap();
    assert_eq!(results.len(), 2);
}
