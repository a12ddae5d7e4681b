mod analysis;
mod input;
mod logging;
mod model;
mod report;
mod session;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::analysis::local::{self, LocalAnalyzer};
use crate::analysis::remote::{RemoteAnalyzer, RemoteConfig};
use crate::analysis::suggestions::{SuggestionTopic, generate_suggestions};
use crate::analysis::{
    Analyzer, QuickSummary, full_summary_with_fallback, quick_summary_with_fallback,
};
use crate::input::load_report;
use crate::report::{ReportInputs, ReportMode, write_reports};
use crate::session::ReportSession;

#[derive(Debug, Parser)]
#[command(
    name = "healthlens",
    version,
    about = "Lab-report analysis and narrative health summaries from CSV health data"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a CSV health report and write summary reports.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Path to the CSV health report (.csv or .csv.gz).
    #[arg(long)]
    input: PathBuf,

    /// Directory the generated reports are written to.
    #[arg(long)]
    out: PathBuf,

    /// Which reports to write.
    #[arg(long, value_enum, default_value = "both")]
    mode: ReportMode,

    /// Override a result before analysis, as "<Test>=<Result>". Repeatable.
    #[arg(long = "set", value_name = "TEST=RESULT")]
    set: Vec<String>,

    /// Also write lifestyle suggestions (nutrition, medications, activity).
    #[arg(long)]
    suggestions: bool,

    /// Base URL of the AI serving endpoint; remote analysis is attempted when set.
    #[arg(long, env = "HEALTHLENS_AI_URL")]
    ai_url: Option<String>,

    /// Bearer token for the AI serving endpoint.
    #[arg(long, env = "HEALTHLENS_AI_TOKEN", hide_env_values = true)]
    ai_token: Option<String>,
}

fn main() {
    dotenvy::dotenv().ok();
    logging::init();
    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;

    let parsed = load_report(&args.input).map_err(|e| e.to_string())?;
    let mut session = ReportSession::new();
    session.replace(parsed.subject, parsed.records);

    for edit in &args.set {
        let (test, value) = split_edit(edit)?;
        if session.update_result(test, value) {
            tracing::info!("result override applied: {} = {}", test, value);
        } else {
            tracing::warn!("no record matches test {:?}; override ignored", test);
        }
    }

    if session.grouped().is_empty() {
        return Err("no health records found; provide a CSV with data rows first".to_string());
    }

    let remote = RemoteAnalyzer::from_config(RemoteConfig {
        base_url: args.ai_url.clone(),
        token: args.ai_token.clone(),
        timeout_secs: None,
    });
    match &remote {
        Some(remote) => tracing::info!("AI endpoint configured: {}", remote.base_url()),
        None => tracing::info!("no AI endpoint configured; using local analysis"),
    }
    let local = LocalAnalyzer::new();
    let remote_ref = remote.as_ref().map(|r| r as &dyn Analyzer);

    let grouped = session.grouped();
    let summary = if args.mode.wants_full() {
        let (summary, source) =
            full_summary_with_fallback(remote_ref, &local, grouped).map_err(|e| e.to_string())?;
        Some((summary, source))
    } else {
        None
    };

    let quick = if args.mode.wants_quick() {
        let quick = quick_summary_with_fallback(remote_ref, &local, grouped).unwrap_or_else(|err| {
            tracing::warn!("quick summary failed: {err}");
            QuickSummary::unavailable()
        });
        tracing::info!("health score {} ({})", quick.score, quick.status.name());
        Some(quick)
    } else {
        None
    };

    let suggestion_sets = if args.suggestions {
        SuggestionTopic::all()
            .iter()
            .map(|&topic| generate_suggestions(remote.as_ref(), grouped, topic))
            .collect()
    } else {
        Vec::new()
    };

    let survey = local::survey(grouped);
    let inputs = ReportInputs {
        subject: session.subject(),
        report: grouped,
        summary: summary.as_ref().map(|(s, source)| (s, *source)),
        quick: quick.as_ref(),
        abnormal_metrics: &survey.abnormal_metrics,
        suggestions: &suggestion_sets,
        tool_version: env!("CARGO_PKG_VERSION"),
    };
    write_reports(&inputs, &args.out).map_err(|e| e.to_string())?;
    tracing::info!("reports written to {}", args.out.display());

    Ok(())
}

fn split_edit(raw: &str) -> Result<(&str, &str), String> {
    match raw.split_once('=') {
        Some((test, value)) if !test.trim().is_empty() => Ok((test.trim(), value.trim())),
        _ => Err(format!(
            "invalid --set value {:?} (expected \"<Test>=<Result>\")",
            raw
        )),
    }
}
