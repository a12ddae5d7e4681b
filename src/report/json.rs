use serde::Serialize;

use crate::analysis::QuickSummary;
use crate::analysis::local::AbnormalMetric;

#[derive(Debug, Serialize)]
pub struct SummaryDocument<'a> {
    pub tool: &'a str,
    pub version: &'a str,
    pub subject: Option<&'a str>,
    pub n_records: usize,
    pub n_categories: usize,
    pub quick: &'a QuickSummary,
    pub abnormal_metrics: &'a [AbnormalMetric],
}

pub fn render_summary_json(doc: &SummaryDocument<'_>) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(doc)?;
    out.push('\n');
    Ok(out)
}
