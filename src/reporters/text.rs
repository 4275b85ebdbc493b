//! Text (terminal) reporter with colors and formatting

use crate::models::{AnalysisOutcome, AnalysisResult, Severity, SyntaxFailure};
use anyhow::Result;
use console::style;

/// Severity tag shown in the issue table
fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "[E]",
        Severity::Warning => "[W]",
        Severity::Info => "[I]",
    }
}

fn paint_severity(severity: Severity, tag: &str) -> String {
    match severity {
        Severity::Error => style(tag).red().to_string(),
        Severity::Warning => style(tag).yellow().to_string(),
        Severity::Info => style(tag).dim().to_string(),
    }
}

fn paint_score(score: u8) -> String {
    let text = format!("{score}/100");
    if score >= 90 {
        style(text).green().bold().to_string()
    } else if score >= 70 {
        style(text).yellow().bold().to_string()
    } else {
        style(text).red().bold().to_string()
    }
}

/// Render an outcome as formatted terminal output
pub fn render(outcome: &AnalysisOutcome) -> Result<String> {
    match outcome {
        AnalysisOutcome::Completed(result) => Ok(render_result(result)),
        AnalysisOutcome::Paused(failure) => Ok(render_failure(failure)),
    }
}

fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", style("RefactorIQ Analysis").bold()));
    out.push_str(&format!(
        "{}\n",
        style("──────────────────────────────────────").dim()
    ));
    out.push_str(&format!(
        "Score: {}  Lines: {}  Issues: {}\n\n",
        paint_score(result.score),
        result.total_lines,
        result.issues.len()
    ));

    if result.issues.is_empty() {
        out.push_str(&format!(
            "{}\n",
            style("No issues found. Nice work!").green()
        ));
        return out;
    }

    out.push_str(&format!(
        "{}\n",
        style("  #   SEV  LINE  ISSUE").dim()
    ));
    for (i, issue) in result.issues.iter().enumerate() {
        let tag = paint_severity(issue.severity, severity_tag(issue.severity));
        let line = issue
            .line
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        // first sentence only; the full message is in the JSON output
        let headline = issue.message.split('\n').next().unwrap_or("");
        out.push_str(&format!("  {:>3}  {tag}  {line:>4}  {headline}\n", i + 1));
    }

    if !result.suggestions.is_empty() {
        out.push_str(&format!("\n{}\n", style("SUGGESTIONS").bold()));
        for suggestion in &result.suggestions {
            out.push_str(&format!(
                "  - {}: {}\n",
                style(&suggestion.kind).cyan(),
                suggestion.description
            ));
        }
    }

    out
}

fn render_failure(failure: &SyntaxFailure) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} {}\n",
        style("Syntax error:").red().bold(),
        failure.message
    ));
    if failure.line > 0 {
        out.push_str(&format!("  on line {}\n", failure.line));
    }
    out.push_str("Analysis is paused until the code parses. Fix the syntax error first.\n");
    out
}
