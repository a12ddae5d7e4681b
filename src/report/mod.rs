use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::analysis::local::AbnormalMetric;
use crate::analysis::suggestions::SuggestionSet;
use crate::analysis::{AnalysisSource, QuickSummary, SummaryResult};
use crate::model::grouped::GroupedReport;
use crate::model::range::classify;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportMode {
    Full,
    Quick,
    Both,
}

impl ReportMode {
    pub fn wants_full(self) -> bool {
        matches!(self, ReportMode::Full | ReportMode::Both)
    }

    pub fn wants_quick(self) -> bool {
        matches!(self, ReportMode::Quick | ReportMode::Both)
    }
}

#[derive(Debug)]
pub struct ReportInputs<'a> {
    pub subject: Option<&'a str>,
    pub report: &'a GroupedReport,
    pub summary: Option<(&'a SummaryResult, AnalysisSource)>,
    pub quick: Option<&'a QuickSummary>,
    pub abnormal_metrics: &'a [AbnormalMetric],
    pub suggestions: &'a [SuggestionSet],
    pub tool_version: &'a str,
}

pub fn write_reports(inputs: &ReportInputs<'_>, out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;

    write_metrics_tsv(inputs.report, &out_dir.join("metrics.tsv"))?;

    if let Some((summary, source)) = inputs.summary {
        let markdown = text::render_summary_markdown(inputs.subject, source, summary);
        write_text(&out_dir.join("report.md"), &markdown)?;
    }

    if let Some(quick) = inputs.quick {
        let doc = json::SummaryDocument {
            tool: "healthlens",
            version: inputs.tool_version,
            subject: inputs.subject,
            n_records: inputs.report.n_records(),
            n_categories: inputs.report.n_categories(),
            quick,
            abnormal_metrics: inputs.abnormal_metrics,
        };
        let rendered = json::render_summary_json(&doc).map_err(io::Error::other)?;
        write_text(&out_dir.join("summary.json"), &rendered)?;
    }

    if !inputs.suggestions.is_empty() {
        let markdown = text::render_suggestions_markdown(inputs.suggestions);
        write_text(&out_dir.join("suggestions.md"), &markdown)?;
    }

    Ok(())
}

fn write_metrics_tsv(report: &GroupedReport, path: &Path) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(
        w,
        "category\ttest\tresult\tunit\tmin\tmax\tdate\tstatus\tposition_pct"
    )?;
    for group in report.categories() {
        for record in &group.records {
            let indicator = classify(record);
            writeln!(
                w,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                group.name,
                record.test,
                record.result,
                record.unit,
                record.min,
                record.max,
                record.date_or_recent(),
                indicator.status.name(),
                format_pct(indicator.position_pct),
            )?;
        }
    }
    Ok(())
}

pub fn format_pct(value: f64) -> String {
    format!("{:.1}", value)
}

fn write_text(path: &Path, contents: &str) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/tests.rs"]
mod tests;
