use crate::analysis::suggestions::SuggestionSet;
use crate::analysis::{AnalysisSource, SummaryResult};

pub fn render_summary_markdown(
    subject: Option<&str>,
    source: AnalysisSource,
    summary: &SummaryResult,
) -> String {
    let mut out = String::new();

    out.push_str("# Health Summary\n\n");
    if let Some(subject) = subject {
        out.push_str(&format!("Subject: {}\n", subject));
    }
    let source_label = match source {
        AnalysisSource::Remote => "AI-assisted analysis",
        AnalysisSource::Local => "Local analysis",
    };
    out.push_str(&format!("Source: {}\n\n", source_label));

    out.push_str("## Key Findings\n\n");
    push_block(&mut out, &summary.key_findings);

    out.push_str("## Recommendations\n\n");
    push_block(&mut out, &summary.recommendations);

    out.push_str("## Detailed Analysis\n\n");
    push_block(&mut out, &summary.detailed_analysis);

    out
}

fn push_block(out: &mut String, block: &str) {
    out.push_str(block.trim_end());
    out.push_str("\n\n");
}

pub fn render_suggestions_markdown(sets: &[SuggestionSet]) -> String {
    let mut out = String::from("# Lifestyle Suggestions\n\n");
    for set in sets {
        out.push_str(&format!("## {}\n\n", set.title));
        out.push_str(&format!("{}\n\n", set.description));
        for line in &set.suggestions {
            out.push_str(&format!("- {}\n", line));
        }
        out.push('\n');
    }
    out
}
