//! Markdown reporter

use crate::models::{AnalysisOutcome, AnalysisResult, SyntaxFailure};
use anyhow::Result;

/// Render an outcome as GitHub-flavored Markdown
pub fn render(outcome: &AnalysisOutcome) -> Result<String> {
    match outcome {
        AnalysisOutcome::Completed(result) => Ok(render_result(result)),
        AnalysisOutcome::Paused(failure) => Ok(render_failure(failure)),
    }
}

fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str("# RefactorIQ Analysis\n\n");
    out.push_str(&format!(
        "**Score:** {}/100 · **Lines:** {} · **Issues:** {}\n\n",
        result.score,
        result.total_lines,
        result.issues.len()
    ));

    if result.issues.is_empty() {
        out.push_str("No issues found.\n");
        return out;
    }

    out.push_str("| # | Kind | Severity | Line | Message |\n");
    out.push_str("|---|------|----------|------|--------|\n");
    for (i, issue) in result.issues.iter().enumerate() {
        let line = issue
            .line
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        let message = issue.message.replace('\n', " ").replace('|', "\\|");
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            i + 1,
            issue.kind,
            issue.severity,
            line,
            message
        ));
    }

    if !result.suggestions.is_empty() {
        out.push_str("\n## Suggestions\n\n");
        for suggestion in &result.suggestions {
            out.push_str(&format!(
                "- **{}**: {}\n",
                suggestion.kind, suggestion.description
            ));
        }
    }

    out
}

fn render_failure(failure: &SyntaxFailure) -> String {
    let mut out = String::new();
    out.push_str("# RefactorIQ Analysis\n\n");
    out.push_str("**Analysis paused** — the code does not parse.\n\n");
    if failure.line > 0 {
        out.push_str(&format!("- Line: {}\n", failure.line));
    }
    out.push_str(&format!("- Error: {}\n", failure.message));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{completed_outcome, paused_outcome};

    #[test]
    fn test_markdown_table_rendered() {
        let rendered = render(&completed_outcome()).expect("render");
        assert!(rendered.contains("| 1 | Unused Variable | info | 2 |"));
        assert!(rendered.contains("## Suggestions"));
    }

    #[test]
    fn test_markdown_paused() {
        let rendered = render(&paused_outcome()).expect("render");
        assert!(rendered.contains("Analysis paused"));
        assert!(rendered.contains("invalid syntax"));
    }
}
