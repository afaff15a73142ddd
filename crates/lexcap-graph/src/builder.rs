use std::collections::HashSet;

use lexcap_core::config::GraphSettings;
use lexcap_core::types::KnowledgeItem;
use lexcap_core::KnowledgeBase;

use crate::types::{EdgeKind, KnowledgeEdge, KnowledgeGraph, KnowledgeNode, NodeRole};

pub struct GraphBuilder<'a> {
    base: &'a KnowledgeBase,
    settings: GraphSettings,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(base: &'a KnowledgeBase) -> Self {
        Self::with_settings(base, GraphSettings::default())
    }

    pub fn with_settings(base: &'a KnowledgeBase, settings: GraphSettings) -> Self {
        Self { base, settings }
    }

    /// Graph around the item with `id`.
    pub fn build_for_id(&self, id: &str) -> lexcap_core::Result<KnowledgeGraph> {
        let center = self.base.require(id)?;
        Ok(self.build(Some(center)))
    }

    /// Graph around `center`, or around the first item when no center is
    /// given. An empty knowledge base without a center gives an empty graph.
    ///
    /// Every item appears at most once: related items first, then up to
    /// `category_cap` items of the same category, then up to `author_cap`
    /// items by the same author. Related ids that do not resolve are skipped.
    pub fn build(&self, center: Option<&KnowledgeItem>) -> KnowledgeGraph {
        let Some(center) = center.or_else(|| self.base.items().first()) else {
            return KnowledgeGraph::default();
        };

        let mut graph = KnowledgeGraph::default();
        let mut placed: HashSet<&str> = HashSet::new();
        graph.nodes.push(node(center, NodeRole::Center));
        placed.insert(center.id.as_str());

        for related_id in &center.related_items {
            match self.base.get(related_id) {
                Some(related) if !placed.contains(related.id.as_str()) => {
                    attach(&mut graph, center, related, EdgeKind::Related);
                    placed.insert(related.id.as_str());
                }
                Some(_) => {}
                None => tracing::debug!(center = %center.id, related = %related_id, "related item not in knowledge base"),
            }
        }

        let same_category: Vec<&KnowledgeItem> = self
            .base
            .items()
            .iter()
            .filter(|i| i.category == center.category && !placed.contains(i.id.as_str()))
            .take(self.settings.category_cap)
            .collect();
        for item in same_category {
            attach(&mut graph, center, item, EdgeKind::Category);
            placed.insert(item.id.as_str());
        }

        let same_author: Vec<&KnowledgeItem> = self
            .base
            .items()
            .iter()
            .filter(|i| i.author == center.author && !placed.contains(i.id.as_str()))
            .take(self.settings.author_cap)
            .collect();
        for item in same_author {
            attach(&mut graph, center, item, EdgeKind::Author);
            placed.insert(item.id.as_str());
        }

        tracing::debug!(center = %center.id, nodes = graph.nodes.len(), edges = graph.edges.len(), "built knowledge graph");
        graph
    }
}

fn attach(graph: &mut KnowledgeGraph, center: &KnowledgeItem, item: &KnowledgeItem, kind: EdgeKind) {
    graph.nodes.push(node(item, kind.role()));
    graph.edges.push(KnowledgeEdge {
        source: center.id.clone(),
        target: item.id.clone(),
        weight: kind.weight(),
        kind,
    });
}

fn node(item: &KnowledgeItem, role: NodeRole) -> KnowledgeNode {
    KnowledgeNode {
        id: item.id.clone(),
        label: truncated_label(&item.title, role.label_chars()),
        item_type: item.item_type,
        size: role.size(),
        role,
    }
}

/// First `max_chars` characters of `title` followed by `...`.
pub fn truncated_label(title: &str, max_chars: usize) -> String {
    let mut label: String = title.chars().take(max_chars).collect();
    label.push_str("...");
    label
}
