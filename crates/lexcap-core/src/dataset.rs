//! The knowledge base: a bundled JSON dataset optionally extended with extra
//! `*.json` files discovered under a directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::KnowledgeItem;

const BUNDLED: &str = include_str!("../data/knowledge_base.json");

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<KnowledgeItem>),
    One(Box<KnowledgeItem>),
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    items: Vec<KnowledgeItem>,
}

impl KnowledgeBase {
    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json("bundled knowledge base", BUNDLED)
    }

    /// Bundled dataset plus every file under `extra_dir`, when given.
    pub fn load(extra_dir: Option<&Path>) -> Result<Self> {
        let mut base = Self::bundled()?;
        if let Some(dir) = extra_dir {
            let added = base.extend_from_dir(dir)?;
            tracing::info!(dir = %dir.display(), added, total = base.len(), "loaded extra knowledge files");
        }
        Ok(base)
    }

    pub fn from_items(items: Vec<KnowledgeItem>) -> Self {
        let mut base = Self::default();
        for item in items {
            base.upsert(item);
        }
        base
    }

    pub fn from_json(name: &str, json: &str) -> Result<Self> {
        let parsed: OneOrMany = serde_json::from_str(json)
            .map_err(|source| Error::Dataset { name: name.to_string(), source })?;
        Ok(Self::from_items(parsed.into_vec()))
    }

    /// Add records from every `*.json` file under `dir`, in path order.
    /// Returns the number of records read.
    pub fn extend_from_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Err(Error::NotFound(format!("knowledge directory {}", dir.display())));
        }
        let mut count = 0;
        for path in list_json_files(dir) {
            let json = fs::read_to_string(&path).map_err(|source| Error::Io { path: path.clone(), source })?;
            let parsed: OneOrMany = serde_json::from_str(&json)
                .map_err(|source| Error::Dataset { name: path.display().to_string(), source })?;
            for item in parsed.into_vec() {
                count += 1;
                self.upsert(item);
            }
        }
        Ok(count)
    }

    pub fn items(&self) -> &[KnowledgeItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&KnowledgeItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&KnowledgeItem> {
        self.get(id).ok_or_else(|| Error::NotFound(format!("knowledge item '{id}'")))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn upsert(&mut self, item: KnowledgeItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            tracing::warn!(id = %item.id, "duplicate knowledge item id, later record wins");
            *existing = item;
        } else {
            self.items.push(item);
        }
    }
}

impl OneOrMany {
    fn into_vec(self) -> Vec<KnowledgeItem> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![*item],
        }
    }
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}
