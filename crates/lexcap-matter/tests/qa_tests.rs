use std::time::Duration;

use lexcap_core::pacing::{Pacer, Pause};
use lexcap_matter::{format_time, MatterAssistant, MatterError, MatterLibrary};

fn assistant() -> MatterAssistant {
    MatterAssistant::new(MatterLibrary::builtin().expect("library"))
}

#[test]
fn builtin_library_contents() {
    let lib = MatterLibrary::builtin().unwrap();
    assert_eq!(lib.documents().len(), 10);
    assert_eq!(lib.sample_questions().len(), 8);
    assert_eq!(lib.document("spa-001").unwrap().title, "Stock Purchase Agreement");
}

#[test]
fn closing_conditions_cite_the_purchase_agreement() {
    let r = assistant().ask("What are all the conditions to closing?").unwrap();
    assert_eq!(r.citations[0].document_id, "spa-001");
    assert_eq!(r.citations[0].section_id, "spa-s2");
    assert_eq!(r.citations[0].page_number, Some(45));
    assert!(r.answer.starts_with("Found 2 relevant sections across 2 documents:"));
    assert!(r.answer.contains("**Stock Purchase Agreement**"));
}

#[test]
fn every_sample_question_cites_an_expected_document_first() {
    let a = assistant();
    for sample in a.library().sample_questions() {
        let r = a.ask(&sample.question).unwrap();
        let top = r.citations.first().unwrap_or_else(|| panic!("no citation for {}", sample.question));
        assert!(
            sample.expected_documents.contains(&top.document_title),
            "{} -> {}",
            sample.question,
            top.document_title
        );
        assert!(r.citations.len() <= 3);
    }
}

#[test]
fn ip_questions_reach_intellectual_property_sections() {
    let r = assistant().ask("What IP is being transferred?").unwrap();
    assert_eq!(r.citations[0].section_title, "5.12 Intellectual Property");
}

#[test]
fn excerpts_are_bounded() {
    let r = assistant().ask("What is the total purchase price and payment structure?").unwrap();
    for c in &r.citations {
        assert!(c.excerpt.chars().count() <= 103, "{}", c.excerpt);
    }
}

#[test]
fn unmatched_question_suggests_topics() {
    let r = assistant().ask("zebra crossing").unwrap();
    assert!(r.citations.is_empty());
    assert!(r.answer.contains("conditions to closing"));
    assert!(r.answer.contains("indemnification terms"));
}

#[test]
fn blank_question_is_rejected() {
    assert!(matches!(assistant().ask("   "), Err(MatterError::EmptyQuestion)));
}

struct FixedPacer;

impl Pacer for FixedPacer {
    fn pause(&self, pause: Pause) -> Duration {
        assert_eq!(pause, Pause::Answer);
        Duration::from_millis(1500)
    }
}

#[test]
fn processing_time_includes_the_pacing_delay() {
    let a = MatterAssistant::with_pacer(MatterLibrary::builtin().unwrap(), Box::new(FixedPacer));
    let r = a.ask("Are there any change of control provisions?").unwrap();
    assert!(r.processing_time >= 1.5);
    assert!(r.processing_time < 3.0);
    assert_eq!(format_time(2.44), "2.4s");
}
