use serde::Serialize;
use thiserror::Error;

use crate::model::grouped::GroupedReport;
use crate::model::score::HealthStatus;

pub mod local;
pub mod remote;
pub mod suggestions;

/// Full narrative analysis: three markdown blocks. Field names keep the
/// wire casing the AI endpoint and the dashboard use.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    #[serde(rename = "keyFindings")]
    pub key_findings: String,
    pub recommendations: String,
    #[serde(rename = "detailedAnalysis")]
    pub detailed_analysis: String,
}

/// Condensed score/status/insights view for the dashboard card.
#[derive(Debug, Clone, Serialize)]
pub struct QuickSummary {
    #[serde(rename = "isAI")]
    pub is_ai: bool,
    pub status: HealthStatus,
    pub score: u32,
    pub insights: [String; 2],
    #[serde(rename = "lastCheckup")]
    pub last_checkup: String,
    #[serde(rename = "nextCheckup")]
    pub next_checkup: String,
}

impl QuickSummary {
    /// Last-resort card shown when quick-summary generation itself fails.
    pub fn unavailable() -> Self {
        Self {
            is_ai: false,
            status: HealthStatus::Unknown,
            score: 0,
            insights: [
                "Unable to analyze health data".to_string(),
                "Please try again later".to_string(),
            ],
            last_checkup: "Unknown".to_string(),
            next_checkup: "Unknown".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no analyzable records in the report")]
    EmptyReport,
    #[error("cannot reach AI endpoint at {0}")]
    Connection(String),
    #[error("AI request timed out after {0}s")]
    Timeout(u64),
    #[error("AI endpoint returned status {status}: {body}")]
    Endpoint { status: u16, body: String },
    #[error("malformed AI response: {0}")]
    MalformedResponse(String),
    #[error("HTTP client error: {0}")]
    Http(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    Remote,
    Local,
}

pub trait Analyzer {
    fn full_summary(&self, report: &GroupedReport) -> Result<SummaryResult, AnalysisError>;
    fn quick_summary(&self, report: &GroupedReport) -> Result<QuickSummary, AnalysisError>;
}

/// Attempt the remote analyzer when configured; any failure falls back to
/// the local analyzer without surfacing the error. Partial remote output is
/// never merged with local output.
pub fn full_summary_with_fallback(
    remote: Option<&dyn Analyzer>,
    local: &dyn Analyzer,
    report: &GroupedReport,
) -> Result<(SummaryResult, AnalysisSource), AnalysisError> {
    if let Some(remote) = remote {
        match remote.full_summary(report) {
            Ok(summary) => return Ok((summary, AnalysisSource::Remote)),
            Err(err) => {
                tracing::warn!("remote analysis failed; falling back to local analysis: {err}")
            }
        }
    }
    local
        .full_summary(report)
        .map(|summary| (summary, AnalysisSource::Local))
}

pub fn quick_summary_with_fallback(
    remote: Option<&dyn Analyzer>,
    local: &dyn Analyzer,
    report: &GroupedReport,
) -> Result<QuickSummary, AnalysisError> {
    if let Some(remote) = remote {
        match remote.quick_summary(report) {
            Ok(summary) => return Ok(summary),
            Err(err) => {
                tracing::warn!("remote quick summary failed; falling back to local analysis: {err}")
            }
        }
    }
    local.quick_summary(report)
}
