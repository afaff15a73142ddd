//! Sentence highlights with `**` concept marking.

use std::cmp::Reverse;

use regex::Regex;

pub const MAX_HIGHLIGHTS: usize = 3;

/// Sentences of `content` (split on `". "`) mentioning any of `terms`, best
/// first. Sentences mentioning more distinct terms rank higher; ties keep
/// their original order.
pub fn relevant_sentences<'c>(content: &'c str, terms: &[String]) -> Vec<&'c str> {
    let mut scored: Vec<(usize, &str)> = content
        .split(". ")
        .filter_map(|sentence| {
            let lower = sentence.to_lowercase();
            let hits = terms.iter().filter(|t| lower.contains(t.as_str())).count();
            (hits > 0).then_some((hits, sentence))
        })
        .collect();
    scored.sort_by_key(|(hits, _)| Reverse(*hits));
    scored.into_iter().map(|(_, s)| s).collect()
}

/// Wrap every whole-word, case-insensitive occurrence of each concept in
/// `**`. Concepts are applied one after another, so an earlier concept can
/// hide a later one that overlaps it.
pub fn bold_concepts(sentence: &str, concepts: &[String]) -> String {
    let mut out = sentence.to_string();
    for concept in concepts {
        if concept.is_empty() {
            continue;
        }
        let Ok(re) = Regex::new(&format!(r"(?i)\b({})\b", regex::escape(concept))) else {
            continue;
        };
        out = re.replace_all(&out, "**${1}**").into_owned();
    }
    out
}

/// Top sentences with concept marking and a closing period.
pub fn extract(content: &str, terms: &[String], concepts: &[String]) -> Vec<String> {
    relevant_sentences(content, terms)
        .into_iter()
        .take(MAX_HIGHLIGHTS)
        .map(|s| format!("{}.", bold_concepts(s, concepts)))
        .collect()
}
