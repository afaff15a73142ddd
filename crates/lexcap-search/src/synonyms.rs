//! Concept table used for query expansion.

/// Built-in legal concepts, in lookup order. Order matters: expansion walks the
/// table front to back, which decides the order of reasons and bolding.
const LEGAL_CONCEPTS: &[(&str, &[&str])] = &[
    ("mac", &["material adverse change", "material adverse effect", "mae", "mac clause"]),
    ("merger", &["m&a", "acquisition", "takeover", "business combination", "consolidation"]),
    ("fiduciary", &["duty of care", "duty of loyalty", "business judgment", "board duties"]),
    ("ip", &["intellectual property", "patent", "copyright", "trademark", "trade secret"]),
    ("ai", &["artificial intelligence", "machine learning", "ml", "neural network", "algorithm"]),
    ("pandemic", &["covid", "epidemic", "health crisis", "force majeure", "act of god"]),
    ("breach", &["violation", "default", "non-compliance", "failure to perform"]),
    ("precedent", &["case law", "prior decision", "judicial ruling", "court opinion"]),
    ("force majeure", &["act of god", "unforeseeable", "extraordinary event", "impossibility"]),
    ("privacy", &["data protection", "gdpr", "personal information", "confidential"]),
    ("compliance", &["regulatory", "conformity", "adherence", "requirements"]),
    ("arbitration", &["dispute resolution", "adr", "mediation", "settlement"]),
];

/// Ordered mapping from a concept key to its synonyms. Keys and synonyms are
/// stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptMap {
    entries: Vec<(String, Vec<String>)>,
}

impl Default for ConceptMap {
    fn default() -> Self {
        Self::legal()
    }
}

impl ConceptMap {
    pub fn legal() -> Self {
        Self::from_entries(LEGAL_CONCEPTS.iter().map(|(k, v)| (*k, v.iter().copied())))
    }

    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn from_entries<I, K, S, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| {
                let syns = v.into_iter().map(|s| s.as_ref().to_lowercase()).collect();
                (k.as_ref().to_lowercase(), syns)
            })
            .collect();
        Self { entries }
    }

    pub fn synonyms(&self, key: &str) -> Option<&[String]> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expand lowercased query terms into an insertion-ordered, duplicate-free
    /// term list.
    ///
    /// The query terms come first. Then, per term: the synonyms of the entry
    /// keyed by that term, followed by the key and synonyms of every entry
    /// with a synonym containing the term.
    pub fn expand(&self, terms: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for term in terms {
            push_unique(&mut out, term);
        }
        for term in terms {
            if let Some(syns) = self.synonyms(term) {
                for s in syns {
                    push_unique(&mut out, s);
                }
            }
            for (key, syns) in &self.entries {
                if syns.iter().any(|s| s.contains(term.as_str())) {
                    push_unique(&mut out, key);
                    for s in syns {
                        push_unique(&mut out, s);
                    }
                }
            }
        }
        out
    }
}

pub(crate) fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}
