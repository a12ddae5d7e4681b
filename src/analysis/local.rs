use std::collections::HashMap;

use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;

use crate::analysis::{AnalysisError, Analyzer, QuickSummary, SummaryResult};
use crate::model::grouped::GroupedReport;
use crate::model::range::{RangeStatus, classify, parse_value};
use crate::model::score::{HealthStatus, health_score, status_for_score};
use crate::model::thresholds::SummaryThresholds;

#[derive(Debug, Clone, Serialize)]
pub struct AbnormalMetric {
    pub name: String,
    pub value: String,
    pub status: RangeStatus,
    pub normal_range: String,
}

#[derive(Debug, Clone)]
pub struct CategoryTally {
    pub name: String,
    pub normal: usize,
    pub abnormal: usize,
}

#[derive(Debug, Clone)]
pub struct TrendPoint {
    pub date: String,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct ReportSurvey {
    pub abnormal_count: usize,
    pub abnormal_metrics: Vec<AbnormalMetric>,
    pub tallies: Vec<CategoryTally>,
    pub trends: Vec<(String, Vec<TrendPoint>)>,
}

/// Single pass over every record: range classification, per-category
/// normal/abnormal tallies, and per-test trend series in encounter order.
pub fn survey(report: &GroupedReport) -> ReportSurvey {
    let mut out = ReportSurvey::default();
    let mut trend_index: HashMap<String, usize> = HashMap::new();

    for group in report.categories() {
        let mut tally = CategoryTally {
            name: group.name.clone(),
            normal: 0,
            abnormal: 0,
        };
        for record in &group.records {
            let indicator = classify(record);
            if indicator.status == RangeStatus::Normal {
                tally.normal += 1;
            } else {
                out.abnormal_count += 1;
                tally.abnormal += 1;
                out.abnormal_metrics.push(AbnormalMetric {
                    name: record.test.clone(),
                    value: format!("{} {}", record.result, record.unit),
                    status: indicator.status,
                    normal_range: format!("{} - {} {}", record.min, record.max, record.unit),
                });
            }

            let point = TrendPoint {
                date: record.date_or_recent().to_string(),
                value: record.result.clone(),
            };
            match trend_index.get(&record.test) {
                Some(&idx) => out.trends[idx].1.push(point),
                None => {
                    trend_index.insert(record.test.clone(), out.trends.len());
                    out.trends.push((record.test.clone(), vec![point]));
                }
            }
        }
        out.tallies.push(tally);
    }

    out
}

pub fn render_key_findings(survey: &ReportSurvey, findings_limit: usize) -> String {
    let mut out = String::new();
    if survey.abnormal_count > 0 {
        out.push_str(&format!(
            "- **{} abnormal results** detected in your health metrics\n",
            survey.abnormal_count
        ));
        out.push_str("- Most concerning metrics:\n");
        for metric in survey.abnormal_metrics.iter().take(findings_limit) {
            out.push_str(&format!(
                "  - **{}**: {} ({}) - Normal range: {}\n",
                metric.name,
                metric.value,
                metric.status.name(),
                metric.normal_range
            ));
        }
    } else {
        out.push_str("- All health metrics are within normal ranges\n");
    }
    out
}

pub fn render_recommendations(survey: &ReportSurvey) -> String {
    let mut out = String::new();
    if survey.abnormal_count > 0 {
        out.push_str(&format!(
            "- **Consult your doctor** about the {} abnormal results\n",
            survey.abnormal_count
        ));
        let names = survey
            .abnormal_metrics
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("- **Monitor closely**: {}\n", names));
        out.push_str("- Consider lifestyle changes based on your specific abnormal results\n");
    } else {
        out.push_str("- Continue with your current health regimen\n");
        out.push_str("- Maintain regular checkups to monitor your health\n");
    }
    out
}

pub fn render_detailed_analysis(survey: &ReportSurvey) -> String {
    let mut out = String::from("### Category Breakdown:\n");
    for tally in &survey.tallies {
        let total = tally.normal + tally.abnormal;
        let pct = if total == 0 {
            0
        } else {
            ((tally.abnormal as f64 / total as f64) * 100.0).round() as u32
        };
        out.push_str(&format!(
            "- **{}**: {} normal, {} abnormal ({}%)\n",
            tally.name, tally.normal, tally.abnormal, pct
        ));
    }

    out.push_str("\n### Trend Analysis:\n");
    for (test, points) in &survey.trends {
        if points.len() > 1 {
            let series = points
                .iter()
                .map(|p| format!("{}: {}", p.date, p.value))
                .collect::<Vec<_>>()
                .join(" → ");
            out.push_str(&format!("- **{}**: {}\n", test, series));
        }
    }
    out
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuickCounts {
    pub total: usize,
    pub abnormal: usize,
    pub categories: usize,
}

/// Dashboard counting pass. A bound of 0 (or one that does not parse) is
/// treated as "no bound" here, unlike the classifier, which takes any
/// parsable bound at face value. Both behaviors are intentional.
pub fn quick_counts(report: &GroupedReport) -> QuickCounts {
    let mut counts = QuickCounts {
        categories: report.n_categories(),
        ..QuickCounts::default()
    };
    for record in report.records() {
        counts.total += 1;
        let min = parse_value(&record.min);
        let max = parse_value(&record.max);
        let result = parse_value(&record.result);
        if (bound_set(min) && result < min) || (bound_set(max) && result > max) {
            counts.abnormal += 1;
        }
    }
    counts
}

fn bound_set(bound: f64) -> bool {
    !bound.is_nan() && bound != 0.0
}

pub fn quick_status(
    counts: &QuickCounts,
    score: u32,
    thresholds: &SummaryThresholds,
) -> HealthStatus {
    if counts.total == 0 {
        HealthStatus::Unknown
    } else {
        status_for_score(score, thresholds)
    }
}

pub fn quick_insights(counts: &QuickCounts) -> [String; 2] {
    [
        if counts.abnormal > 0 {
            format!("{} metrics need attention", counts.abnormal)
        } else {
            "All metrics look good".to_string()
        },
        if counts.categories > 0 {
            format!("{} categories analyzed", counts.categories)
        } else {
            "Add more health data".to_string()
        },
    ]
}

/// Synthetic checkup window around a given day.
pub fn checkup_window(today: NaiveDate, thresholds: &SummaryThresholds) -> (String, String) {
    let last = today - Duration::days(thresholds.last_checkup_days);
    let next = today + Duration::days(thresholds.next_checkup_days);
    (format_checkup_date(last), format_checkup_date(next))
}

pub fn format_checkup_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Rule-based analyzer over the grouped report; the fallback target when no
/// AI endpoint is configured or the remote call fails.
#[derive(Debug, Clone)]
pub struct LocalAnalyzer {
    thresholds: SummaryThresholds,
}

impl LocalAnalyzer {
    pub fn new() -> Self {
        Self {
            thresholds: SummaryThresholds::default_v1(),
        }
    }

    pub fn with_thresholds(thresholds: SummaryThresholds) -> Self {
        Self { thresholds }
    }
}

impl Default for LocalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for LocalAnalyzer {
    fn full_summary(&self, report: &GroupedReport) -> Result<SummaryResult, AnalysisError> {
        if report.is_empty() {
            return Err(AnalysisError::EmptyReport);
        }
        let survey = survey(report);
        Ok(SummaryResult {
            key_findings: render_key_findings(&survey, self.thresholds.findings_limit),
            recommendations: render_recommendations(&survey),
            detailed_analysis: render_detailed_analysis(&survey),
        })
    }

    fn quick_summary(&self, report: &GroupedReport) -> Result<QuickSummary, AnalysisError> {
        if report.is_empty() {
            return Err(AnalysisError::EmptyReport);
        }
        let counts = quick_counts(report);
        let score = health_score(counts.total, counts.abnormal);
        let status = quick_status(&counts, score, &self.thresholds);
        let (last_checkup, next_checkup) =
            checkup_window(Local::now().date_naive(), &self.thresholds);
        Ok(QuickSummary {
            is_ai: false,
            status,
            score,
            insights: quick_insights(&counts),
            last_checkup,
            next_checkup,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/local.rs"]
mod tests;
