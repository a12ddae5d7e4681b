use serde::Serialize;

use crate::model::thresholds::SummaryThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Good,
    Caution,
    Warning,
    Unknown,
}

impl HealthStatus {
    pub fn name(self) -> &'static str {
        match self {
            HealthStatus::Good => "Good",
            HealthStatus::Caution => "Caution",
            HealthStatus::Warning => "Warning",
            HealthStatus::Unknown => "Unknown",
        }
    }
}

/// Share of in-range metrics as a rounded 0-100 integer. A zero total
/// yields 0; callers that care map it to `HealthStatus::Unknown`.
pub fn health_score(total: usize, abnormal: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (((total - abnormal) as f64 / total as f64) * 100.0).round() as u32
}

pub fn status_for_score(score: u32, thresholds: &SummaryThresholds) -> HealthStatus {
    if score >= thresholds.good_min {
        HealthStatus::Good
    } else if score >= thresholds.caution_min {
        HealthStatus::Caution
    } else {
        HealthStatus::Warning
    }
}
