use serde::Serialize;

use lexcap_core::config::RoiSettings;

pub const DEFAULT_LAWYERS: u32 = 50;

/// Share of the annual savings attributed to each benefit. Sums to 1.
const BREAKDOWN: [(&str, f64); 4] = [
    ("Research Time Reduction", 0.40),
    ("Improved Deal Velocity", 0.25),
    ("Risk Mitigation", 0.20),
    ("Knowledge Transfer", 0.15),
];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownItem {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoiReport {
    pub lawyers: u32,
    pub annual_savings: f64,
    pub time_saved_hours: f64,
    pub cost_per_lawyer: f64,
    pub breakdown_items: Vec<BreakdownItem>,
}

/// Savings with the default rate and hours (600/h, 8 h a week, 48 weeks).
pub fn calculate_roi(lawyers: u32) -> RoiReport {
    calculate_roi_with(lawyers, &RoiSettings::default())
}

/// Lawyer counts below one are treated as one.
pub fn calculate_roi_with(lawyers: u32, settings: &RoiSettings) -> RoiReport {
    let lawyers = lawyers.max(1);
    let time_saved_hours = f64::from(lawyers) * settings.hours_per_week * settings.weeks_per_year;
    let annual_savings = time_saved_hours * settings.hourly_rate;
    RoiReport {
        lawyers,
        annual_savings,
        time_saved_hours,
        cost_per_lawyer: annual_savings / f64::from(lawyers),
        breakdown_items: BREAKDOWN
            .iter()
            .map(|(category, share)| BreakdownItem { category: (*category).to_string(), amount: annual_savings * share })
            .collect(),
    }
}
