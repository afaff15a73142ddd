//! Domain types used by the search engines, the graph builder and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub type ItemId = String;

/// Kind of captured expertise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Contract,
    Precedent,
    Opinion,
    Memo,
    Clause,
}

impl ItemType {
    pub const ALL: [ItemType; 5] = [
        ItemType::Contract,
        ItemType::Precedent,
        ItemType::Opinion,
        ItemType::Memo,
        ItemType::Clause,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Contract => "contract",
            ItemType::Precedent => "precedent",
            ItemType::Opinion => "opinion",
            ItemType::Memo => "memo",
            ItemType::Clause => "clause",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ItemType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| Error::UnknownItemType(s.to_string()))
    }
}

/// A unit of captured legal expertise.
///
/// Records are loaded once (bundled JSON plus optional extra files) and never
/// mutated. Field names serialize in camelCase to stay compatible with the
/// dataset files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeItem {
    pub id: ItemId,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    pub date: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_years_experience: Option<u32>,
    pub summary: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub confidence_score: u8,
    pub ethical_wall_compliant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_items: Vec<ItemId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_impact: Option<String>,
}

impl KnowledgeItem {
    /// Display badge derived from department and the ethical-wall flag.
    pub fn access_level(&self) -> AccessLevel {
        match self.department.as_deref() {
            Some("Corporate/M&A" | "Private Equity") => AccessLevel::PartnerAccess,
            _ if self.ethical_wall_compliant => AccessLevel::Public,
            _ => AccessLevel::Confidential,
        }
    }

    /// Authors past 25 years count as senior for scoring and display.
    pub fn is_senior_author(&self) -> bool {
        self.author_years_experience.is_some_and(|y| y > 25)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccessLevel {
    PartnerAccess,
    Public,
    Confidential,
}

impl AccessLevel {
    pub fn label(self) -> &'static str {
        match self {
            AccessLevel::PartnerAccess => "Partner Access",
            AccessLevel::Public => "Public",
            AccessLevel::Confidential => "Confidential",
        }
    }
}

/// Indicates which engine produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Semantic,
    Text,
}

/// A knowledge item annotated for one query.
///
/// `semantic_score` is normalized into `0.0..=0.99` by every engine so results
/// from different engines can be merged. `highlights` mark matched concepts
/// with `**`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(flatten)]
    pub item: KnowledgeItem,
    pub matched_query: String,
    pub semantic_score: f32,
    pub highlights: Vec<String>,
    #[serde(default)]
    pub matched_concepts: Vec<String>,
    #[serde(default)]
    pub semantic_reasons: Vec<String>,
    pub source: SourceKind,
}

impl SearchResult {
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_score(self.semantic_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfidenceBand {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ConfidenceBand {
    pub fn from_score(score: f32) -> Self {
        if score >= 0.9 {
            ConfidenceBand::VeryHigh
        } else if score >= 0.7 {
            ConfidenceBand::High
        } else if score >= 0.5 {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::Low
        }
    }
}

/// Queries shorter than `min_len` (after trimming) are not executed.
pub fn is_actionable_query(query: &str, min_len: usize) -> bool {
    query.trim().chars().count() >= min_len
}

/// Keep only results whose item type is listed. An empty list keeps everything.
pub fn retain_types(results: &mut Vec<SearchResult>, types: &[ItemType]) {
    if types.is_empty() {
        return;
    }
    results.retain(|r| types.contains(&r.item.item_type));
}
