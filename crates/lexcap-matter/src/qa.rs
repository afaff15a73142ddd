use std::cmp::Reverse;
use std::fmt::Write as _;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;

use lexcap_core::pacing::{NoPause, Pacer, Pause};

use crate::documents::{DocumentSection, MatterDocument, MatterLibrary};

const MAX_CITATIONS: usize = 3;
const EXCERPT_CHARS: usize = 100;

const STOP_WORDS: &[&str] = &[
    "what", "when", "where", "which", "whom", "whose", "there", "their", "they", "them", "then", "than", "that",
    "this", "these", "those", "with", "from", "into", "about", "have", "does", "being", "been", "were", "will",
    "would", "should", "could", "shall", "your", "some", "also", "such", "each", "very", "much", "many", "more",
    "most", "other", "only", "over", "under",
];

/// Short words that would otherwise be dropped by the length rule.
const ACRONYMS: &[(&str, &[&str])] = &[("ip", &["intellectual", "property"])];

const NO_MATCH_ANSWER: &str = "I couldn't find a section of the matter documents that addresses this question. \
I can help you understand specific aspects of this deal. Please ask about conditions to closing, change of \
control provisions, intellectual property transfers, or indemnification terms.";

#[derive(Debug, Error)]
pub enum MatterError {
    #[error("Question is empty")]
    EmptyQuestion,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub document_id: String,
    pub document_title: String,
    pub section_id: String,
    pub section_title: String,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QaResponse {
    pub question: String,
    pub answer: String,
    pub citations: Vec<Citation>,
    /// Seconds, including the pacing delay.
    pub processing_time: f64,
}

pub struct MatterAssistant {
    library: MatterLibrary,
    pacer: Box<dyn Pacer>,
}

impl MatterAssistant {
    pub fn new(library: MatterLibrary) -> Self {
        Self::with_pacer(library, Box::new(NoPause))
    }

    pub fn with_pacer(library: MatterLibrary, pacer: Box<dyn Pacer>) -> Self {
        Self { library, pacer }
    }

    pub fn library(&self) -> &MatterLibrary {
        &self.library
    }

    pub fn ask(&self, question: &str) -> Result<QaResponse, MatterError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(MatterError::EmptyQuestion);
        }
        let waited = self.pacer.pause(Pause::Answer);
        let started = Instant::now();

        let terms = keywords(question);
        let citations = self.cite(&terms);
        let answer = compose_answer(&citations);
        let processing_time = (waited + started.elapsed()).as_secs_f64();
        tracing::debug!(question, keywords = terms.len(), citations = citations.len(), "answered matter question");

        Ok(QaResponse { question: question.to_string(), answer, citations, processing_time })
    }

    fn cite(&self, terms: &[String]) -> Vec<Citation> {
        if terms.is_empty() {
            return Vec::new();
        }
        let mut scored: Vec<(usize, &MatterDocument, &DocumentSection)> = self
            .library
            .documents()
            .iter()
            .flat_map(|doc| doc.sections.iter().map(move |s| (doc, s)))
            .filter_map(|(doc, section)| {
                let score = section_score(section, terms);
                (score > 0).then_some((score, doc, section))
            })
            .collect();
        scored.sort_by_key(|(score, _, _)| Reverse(*score));
        scored
            .into_iter()
            .take(MAX_CITATIONS)
            .map(|(_, doc, section)| Citation {
                document_id: doc.id.clone(),
                document_title: doc.title.clone(),
                section_id: section.id.clone(),
                section_title: section.title.clone(),
                excerpt: excerpt(&section.content, terms),
                page_number: section.page_number,
            })
            .collect()
    }
}

/// Lowercased words longer than three characters, punctuation trimmed, stop
/// words removed, in question order without repeats.
pub fn keywords(question: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw in question.split_whitespace() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
        let expanded: Vec<&str> = ACRONYMS
            .iter()
            .find(|(short, _)| *short == word)
            .map_or_else(|| vec![word.as_str()], |(_, long)| long.to_vec());
        for w in expanded {
            if w.chars().count() > 3 && !STOP_WORDS.contains(&w) && !out.iter().any(|o| o == w) {
                out.push(w.to_string());
            }
        }
    }
    out
}

/// Two points per keyword in the title, one per keyword in the content.
fn section_score(section: &DocumentSection, terms: &[String]) -> usize {
    let title = section.title.to_lowercase();
    let content = section.content.to_lowercase();
    terms.iter().map(|t| 2 * usize::from(title.contains(t.as_str())) + usize::from(content.contains(t.as_str()))).sum()
}

/// The sentence mentioning the most keywords, cut to `EXCERPT_CHARS`.
fn excerpt(content: &str, terms: &[String]) -> String {
    let mut best = ("", 0usize);
    for sentence in content.split(". ") {
        let lower = sentence.to_lowercase();
        let hits = terms.iter().filter(|t| lower.contains(t.as_str())).count();
        if hits > best.1 || best.0.is_empty() {
            best = (sentence, hits);
        }
    }
    let sentence = best.0.trim();
    if sentence.chars().count() > EXCERPT_CHARS {
        let cut: String = sentence.chars().take(EXCERPT_CHARS).collect();
        format!("{cut}...")
    } else {
        sentence.to_string()
    }
}

fn compose_answer(citations: &[Citation]) -> String {
    if citations.is_empty() {
        return NO_MATCH_ANSWER.to_string();
    }
    let mut docs: Vec<&str> = citations.iter().map(|c| c.document_id.as_str()).collect();
    docs.sort_unstable();
    docs.dedup();
    let mut out = format!(
        "Found {} relevant section{} across {} document{}:\n",
        citations.len(),
        if citations.len() == 1 { "" } else { "s" },
        docs.len(),
        if docs.len() == 1 { "" } else { "s" },
    );
    for (i, c) in citations.iter().enumerate() {
        let page = c.page_number.map(|p| format!(" (p. {p})")).unwrap_or_default();
        let _ = write!(out, "\n{}. **{}**, {}{}: {}", i + 1, c.document_title, c.section_title, page, c.excerpt);
    }
    out
}

/// Seconds with one decimal, e.g. `2.4s`.
pub fn format_time(seconds: f64) -> String {
    format!("{seconds:.1}s")
}
