//! Unbilled-time recovery: find billable work that never reached a timesheet.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lexcap_core::config::RoiSettings;
use lexcap_core::pacing::{Pacer, Pause};

const SAMPLE_ACTIVITIES: &str = include_str!("../data/unbilled_activities.json");

#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("Failed to parse activity data: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("Unknown activity: {0}")]
    UnknownActivity(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Email,
    Document,
    Meeting,
    Call,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnbilledActivity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub client: String,
    pub matter: String,
    pub description: String,
    pub date: String,
    /// Minutes.
    pub duration: u32,
    pub value: f64,
    /// Detection confidence, 0 to 100.
    pub confidence: u8,
    pub source: String,
}

impl UnbilledActivity {
    pub fn sample() -> Result<Vec<Self>, RecoveryError> {
        Ok(serde_json::from_str(SAMPLE_ACTIVITIES)?)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecoverySummary {
    pub selected: usize,
    pub total_recovered: f64,
    pub total_hours: f64,
    pub monthly_subscription: f64,
    pub roi_multiple: f64,
}

/// Activity list plus the user's selection. Selection order is kept.
#[derive(Debug, Clone)]
pub struct RecoverySession {
    activities: Vec<UnbilledActivity>,
    selected: Vec<String>,
    analyzed: bool,
    settings: RoiSettings,
}

impl RecoverySession {
    pub fn new(activities: Vec<UnbilledActivity>, settings: RoiSettings) -> Self {
        Self { activities, selected: Vec::new(), analyzed: false, settings }
    }

    pub fn sample(settings: RoiSettings) -> Result<Self, RecoveryError> {
        Ok(Self::new(UnbilledActivity::sample()?, settings))
    }

    pub fn activities(&self) -> &[UnbilledActivity] {
        &self.activities
    }

    pub fn is_analyzed(&self) -> bool {
        self.analyzed
    }

    /// Run the analysis: wait out the pacing delay, then select every
    /// activity at or above the auto-select confidence. Returns the time spent
    /// waiting.
    pub fn analyze(&mut self, pacer: &dyn Pacer) -> Duration {
        let waited = pacer.pause(Pause::Analysis);
        let threshold = self.settings.auto_select_confidence;
        self.selected = self
            .activities
            .iter()
            .filter(|a| a.confidence >= threshold)
            .map(|a| a.id.clone())
            .collect();
        self.analyzed = true;
        tracing::info!(found = self.activities.len(), selected = self.selected.len(), "unbilled time analysis complete");
        waited
    }

    /// Flip the selection of one activity. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> Result<bool, RecoveryError> {
        if !self.activities.iter().any(|a| a.id == id) {
            return Err(RecoveryError::UnknownActivity(id.to_string()));
        }
        if let Some(at) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(at);
            Ok(false)
        } else {
            self.selected.push(id.to_string());
            Ok(true)
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    /// Value of every detected activity, selected or not.
    pub fn found_value(&self) -> f64 {
        self.activities.iter().map(|a| a.value).sum()
    }

    /// Hours across every detected activity.
    pub fn found_hours(&self) -> f64 {
        minutes_to_hours(self.activities.iter().map(|a| a.duration).sum())
    }

    pub fn summary(&self) -> RecoverySummary {
        let chosen: Vec<&UnbilledActivity> = self.activities.iter().filter(|a| self.is_selected(&a.id)).collect();
        let total_recovered: f64 = chosen.iter().map(|a| a.value).sum();
        let total_hours = minutes_to_hours(chosen.iter().map(|a| a.duration).sum());
        RecoverySummary {
            selected: chosen.len(),
            total_recovered,
            total_hours,
            monthly_subscription: self.settings.monthly_subscription,
            roi_multiple: total_recovered / self.settings.monthly_subscription,
        }
    }
}

fn minutes_to_hours(minutes: u32) -> f64 {
    f64::from(minutes) / 60.0
}
