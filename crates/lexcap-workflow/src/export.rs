//! JSON export documents for both builders and the file writer.
//!
//! Exports are write-only: nothing in the crate reads them back.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, WorkflowError};
use crate::types::{NodeCategory, Position};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportedStep {
    pub order: usize,
    pub node_type: String,
    pub label: String,
    pub category: NodeCategory,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepListExport {
    pub name: String,
    pub timestamp: String,
    pub steps: Vec<ExportedStep>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExportedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub label: String,
    pub category: NodeCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExportedConnection {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CanvasExport {
    pub name: String,
    pub timestamp: String,
    pub nodes: Vec<ExportedNode>,
    pub connections: Vec<ExportedConnection>,
}

/// Current UTC time as ISO-8601 with milliseconds, e.g. `2024-05-01T09:30:00.000Z`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `<name lowercased, whitespace runs replaced by '-'>-workflow.json`
pub fn export_file_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let slug = match Regex::new(r"\s+") {
        Ok(re) => re.replace_all(&lower, "-").into_owned(),
        Err(_) => lower.split_whitespace().collect::<Vec<_>>().join("-"),
    };
    format!("{slug}-workflow.json")
}

/// Write `doc` as pretty JSON into `dir` (created when missing) under the
/// file name derived from `name`. Returns the written path.
pub fn write_export<T: Serialize>(dir: &Path, name: &str, doc: &T) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| WorkflowError::Io { path: dir.to_path_buf(), source })?;
    let path = dir.join(export_file_name(name));
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(&path, json).map_err(|source| WorkflowError::Io { path: path.clone(), source })?;
    tracing::info!(path = %path.display(), "exported workflow");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_collapses_whitespace_runs() {
        assert_eq!(export_file_name("M&A Due  Diligence"), "m&a-due-diligence-workflow.json");
        assert_eq!(export_file_name("Untitled Workflow "), "untitled-workflow--workflow.json");
    }

    #[test]
    fn timestamp_is_utc_with_millis() {
        let ts = now_timestamp();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2024-05-01T09:30:00.000Z".len());
    }
}
