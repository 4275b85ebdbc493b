//! Analyze command

use crate::analyzer;
use crate::cli::{config_dir, read_source};
use crate::config::Config;
use crate::models::{AnalysisOutcome, Severity};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

pub fn run(
    path: Option<&Path>,
    format: &str,
    output: Option<&Path>,
    fail_on: Option<&str>,
) -> Result<()> {
    let source = read_source(path)?;
    let config = Config::load(&config_dir(path));
    let format = OutputFormat::from_str(format)?;

    let outcome = analyzer::analyze_with(&source, &config.thresholds);
    if let AnalysisOutcome::Completed(result) = &outcome {
        info!(
            "analysis complete: score {} with {} issues over {} lines",
            result.score,
            result.issues.len(),
            result.total_lines
        );
    }

    let rendered = reporters::report(&outcome, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    if let Some(level) = fail_on {
        if trips_fail_on(&outcome, level) {
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Whether the outcome should fail a CI gate at the given severity
fn trips_fail_on(outcome: &AnalysisOutcome, level: &str) -> bool {
    let threshold = match level {
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        _ => Severity::Info,
    };
    match outcome {
        // code that does not parse always fails the gate
        AnalysisOutcome::Paused(_) => true,
        AnalysisOutcome::Completed(result) => {
            result.issues.iter().any(|i| i.severity >= threshold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;

    #[test]
    fn test_fail_on_thresholds() {
        let outcome = analyze("def f(a):\n    unused = a\n    return a\n");
        // one info issue: trips "info" but not "warning"
        assert!(trips_fail_on(&outcome, "info"));
        assert!(!trips_fail_on(&outcome, "warning"));
        assert!(!trips_fail_on(&outcome, "error"));
    }

    #[test]
    fn test_fail_on_syntax_error() {
        let outcome = analyze("def f(:\n");
        assert!(trips_fail_on(&outcome, "error"));
    }

    #[test]
    fn test_clean_code_never_trips() {
        let outcome = analyze("print('hi')\n");
        assert!(!trips_fail_on(&outcome, "info"));
    }
}
