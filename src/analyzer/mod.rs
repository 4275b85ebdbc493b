//! The analyzer: parse, detect, score
//!
//! `analyze` is a pure function of its input. Each call parses the
//! submitted source, runs the detector registry over the AST in a fixed
//! order, folds the issues into a score and derives deduplicated
//! suggestions. No state survives between calls, so concurrent
//! invocations cannot interfere.

use crate::config::Thresholds;
use crate::detectors::{self, ModuleView};
use crate::models::{AnalysisOutcome, AnalysisResult, Issue, Suggestion};
use crate::parsers::parse_module;
use crate::scoring::quality_score;
use std::collections::HashSet;
use tracing::debug;

/// Analyze Python source with default thresholds.
///
/// Returns [`AnalysisOutcome::Paused`] if and only if the source does
/// not parse; every other input (including empty source) completes.
pub fn analyze(source: &str) -> AnalysisOutcome {
    analyze_with(source, &Thresholds::default())
}

/// Analyze Python source with explicit thresholds
pub fn analyze_with(source: &str, thresholds: &Thresholds) -> AnalysisOutcome {
    let parsed = match parse_module(source) {
        Ok(parsed) => parsed,
        Err(failure) => {
            debug!(
                "analysis paused: syntax error on line {}: {}",
                failure.line, failure.message
            );
            return AnalysisOutcome::Paused(failure);
        }
    };

    let view = ModuleView {
        parsed: &parsed,
        source,
        thresholds,
    };
    let issues = detectors::run_all(&view);
    let score = quality_score(&issues);
    let suggestions = derive_suggestions(&issues);

    AnalysisOutcome::Completed(AnalysisResult {
        score,
        total_lines: source.lines().count(),
        suggestions,
        issues,
    })
}

/// One suggestion per issue that carries one, deduplicated by
/// (suggestion kind, target name), preserving discovery order.
fn derive_suggestions(issues: &[Issue]) -> Vec<Suggestion> {
    let mut seen: HashSet<(&'static str, Option<&str>)> = HashSet::new();
    let mut suggestions = Vec::new();
    for issue in issues {
        let Some(text) = &issue.suggestion else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        let kind = issue.kind.suggestion_kind();
        if !seen.insert((kind, issue.target.as_deref())) {
            continue;
        }
        suggestions.push(Suggestion {
            kind: kind.to_string(),
            description: text.clone(),
        });
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueKind, Severity};

    #[test]
    fn test_empty_source_scores_100() {
        let AnalysisOutcome::Completed(result) = analyze("") else {
            panic!("empty source must complete");
        };
        assert!(result.issues.is_empty());
        assert_eq!(result.score, 100);
        assert_eq!(result.total_lines, 0);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_source_with_no_functions_completes() {
        let AnalysisOutcome::Completed(result) = analyze("x = 1\nprint(x)\n") else {
            panic!("must complete");
        };
        assert_eq!(result.score, 100);
        assert_eq!(result.total_lines, 2);
    }

    #[test]
    fn test_syntax_error_pauses() {
        let AnalysisOutcome::Paused(failure) = analyze("def f(:\n    pass\n") else {
            panic!("must pause");
        };
        assert!(!failure.message.is_empty());
    }

    #[test]
    fn test_suggestions_dedup_by_kind_and_target() {
        // two unused variables in the same function produce two issues
        // but two suggestions (distinct targets); the same variable
        // never produces two suggestions
        let source = "def f(a):\n    x1 = a\n    x2 = a\n    return a\n";
        let AnalysisOutcome::Completed(result) = analyze(source) else {
            panic!("must complete");
        };
        let unused: Vec<_> = result
            .issues
            .iter()
            .filter(|i| i.kind == IssueKind::UnusedVariable)
            .collect();
        assert_eq!(unused.len(), 2);
        assert_eq!(result.suggestions.len(), 2);
    }

    #[test]
    fn test_same_kind_same_target_collapses() {
        // constant conditions carry no target: many issues, one suggestion
        let source = "if True:\n    pass\nif False:\n    pass\n";
        let AnalysisOutcome::Completed(result) = analyze(source) else {
            panic!("must complete");
        };
        let constant = result
            .issues
            .iter()
            .filter(|i| i.kind == IssueKind::ConstantCondition)
            .count();
        assert_eq!(constant, 2);
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].kind, "Fix Condition");
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let source = "\
def f(a):
    unused = a
    if a == a:
        return 1
    return 2
";
        let AnalysisOutcome::Completed(first) = analyze(source) else {
            panic!("must complete");
        };
        let AnalysisOutcome::Completed(second) = analyze(source) else {
            panic!("must complete");
        };
        assert_eq!(first.score, second.score);
        assert_eq!(first.issues.len(), second.issues.len());
        for (a, b) in first.issues.iter().zip(&second.issues) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.message, b.message);
            assert_eq!(a.line, b.line);
        }
    }

    #[test]
    fn test_cross_kind_issues_not_deduplicated() {
        // a self-comparison if is also a constant-ish condition case:
        // both detectors may fire on the same function without merging
        let source = "def f(a):\n    if a == a:\n        return 1\n    return 2\n";
        let AnalysisOutcome::Completed(result) = analyze(source) else {
            panic!("must complete");
        };
        let self_cmp = result
            .issues
            .iter()
            .filter(|i| i.kind == IssueKind::SelfComparison)
            .count();
        assert_eq!(self_cmp, 1);
        assert_eq!(result.issues[0].severity, Severity::Error);
        assert_eq!(result.score, 90);
    }
}
