use std::time::Duration;

use chrono::Local;
use serde::Serialize;
use serde_json::{Value, json};

use crate::analysis::local::{checkup_window, quick_counts, quick_status};
use crate::analysis::suggestions::{SuggestionSet, SuggestionTopic, local_defaults};
use crate::analysis::{AnalysisError, Analyzer, QuickSummary, SummaryResult};
use crate::model::grouped::GroupedReport;
use crate::model::range::{RangeStatus, classify, parse_value};
use crate::model::score::health_score;
use crate::model::thresholds::SummaryThresholds;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

const FALLBACK_INSIGHTS: [&str; 2] = ["Review your blood work", "Monitor your vitamin levels"];

#[derive(Debug, Clone, Default)]
pub struct RemoteConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Adapter for the AI serving endpoint. Same output contracts as the local
/// analyzer; every error is reported to the caller so the composing layer
/// can fall back.
pub struct RemoteAnalyzer {
    base_url: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
    thresholds: SummaryThresholds,
}

impl RemoteAnalyzer {
    /// Returns None when no endpoint is configured.
    pub fn from_config(config: RemoteConfig) -> Option<Self> {
        let base_url = config.base_url?;
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return None;
        }
        let timeout_secs = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                tracing::warn!("cannot build HTTP client; remote analysis disabled: {err}");
                return None;
            }
        };
        Some(Self {
            base_url,
            token: config.token,
            client,
            timeout_secs,
            thresholds: SummaryThresholds::default_v1(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, endpoint: &str, body: &Value) -> Result<Value, AnalysisError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().map_err(|e| {
            if e.is_connect() {
                AnalysisError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                AnalysisError::Timeout(self.timeout_secs)
            } else {
                AnalysisError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
    }

    pub fn suggestions(
        &self,
        report: &GroupedReport,
        topic: SuggestionTopic,
    ) -> Result<SuggestionSet, AnalysisError> {
        let payload = format_payload(report);
        let value = self.post(topic.endpoint(), &json!({ "inputs": payload }))?;
        let suggestions = string_array(&value, "suggestions")
            .filter(|items| !items.is_empty())
            .unwrap_or_else(|| local_defaults(report, topic));
        Ok(SuggestionSet {
            is_ai: true,
            title: topic.title().to_string(),
            description: topic.remote_description().to_string(),
            suggestions,
        })
    }
}

impl Analyzer for RemoteAnalyzer {
    fn full_summary(&self, report: &GroupedReport) -> Result<SummaryResult, AnalysisError> {
        let payload = format_payload(report);
        let value = self.post("predict", &json!({ "inputs": payload }))?;
        extract_summary(&value)
    }

    // Score and status are always computed locally; only the insight lines
    // come from the endpoint.
    fn quick_summary(&self, report: &GroupedReport) -> Result<QuickSummary, AnalysisError> {
        let counts = quick_counts(report);
        let score = health_score(counts.total, counts.abnormal);
        let status = quick_status(&counts, score, &self.thresholds);

        let payload: Vec<MetricPayload> = format_payload(report)
            .into_iter()
            .take(self.thresholds.quick_insight_limit)
            .collect();
        let value = self.post("quick-insights", &json!({ "inputs": payload }))?;
        let insights = string_array(&value, "insights").unwrap_or_default();

        let (last_checkup, next_checkup) =
            checkup_window(Local::now().date_naive(), &self.thresholds);
        Ok(QuickSummary {
            is_ai: true,
            status,
            score,
            insights: insight_pair(insights),
            last_checkup,
            next_checkup,
        })
    }
}

/// One metric as sent to the endpoint: raw value plus the parsed view.
#[derive(Debug, Clone, Serialize)]
pub struct MetricPayload {
    pub name: String,
    pub category: String,
    pub test: String,
    pub result: Option<f64>,
    #[serde(rename = "resultRaw")]
    pub result_raw: String,
    pub unit: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    #[serde(rename = "isAbnormal")]
    pub is_abnormal: bool,
}

pub fn format_payload(report: &GroupedReport) -> Vec<MetricPayload> {
    let mut out = Vec::with_capacity(report.n_records());
    for group in report.categories() {
        for record in &group.records {
            out.push(MetricPayload {
                name: record.name.clone(),
                category: group.name.clone(),
                test: record.test.clone(),
                result: finite(parse_value(&record.result)),
                result_raw: record.result.clone(),
                unit: record.unit.clone(),
                min: finite(parse_value(&record.min)),
                max: finite(parse_value(&record.max)),
                is_abnormal: classify(record).status != RangeStatus::Normal,
            });
        }
    }
    out
}

fn finite(value: f64) -> Option<f64> {
    if value.is_nan() { None } else { Some(value) }
}

/// Accepts the three blocks at top level or nested under `predictions` /
/// `output`, with `summary` / `details` as aliases. Anything without a
/// findings block is malformed and triggers the local fallback upstream.
pub fn extract_summary(value: &Value) -> Result<SummaryResult, AnalysisError> {
    let body = value
        .get("predictions")
        .or_else(|| value.get("output"))
        .unwrap_or(value);
    let key_findings = string_field(body, &["keyFindings", "summary"]);
    let Some(key_findings) = key_findings else {
        return Err(AnalysisError::MalformedResponse(
            "response carries no summary fields".to_string(),
        ));
    };
    Ok(SummaryResult {
        key_findings,
        recommendations: string_field(body, &["recommendations"]).unwrap_or_default(),
        detailed_analysis: string_field(body, &["detailedAnalysis", "details"]).unwrap_or_default(),
    })
}

fn string_field(body: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| body.get(name).and_then(Value::as_str).map(str::to_string))
}

fn string_array(body: &Value, name: &str) -> Option<Vec<String>> {
    body.get(name).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

/// The card shows exactly two insight lines; pad short responses with the
/// stock pair.
pub fn insight_pair(items: Vec<String>) -> [String; 2] {
    let mut iter = items.into_iter();
    [
        iter.next()
            .unwrap_or_else(|| FALLBACK_INSIGHTS[0].to_string()),
        iter.next()
            .unwrap_or_else(|| FALLBACK_INSIGHTS[1].to_string()),
    ]
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/remote.rs"]
mod tests;
