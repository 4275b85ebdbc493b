//! JSON reporter
//!
//! Emits the response envelope exactly as an HTTP layer would, so
//! `--format json` output can be piped to jq or consumed by a frontend.

use crate::api::AnalyzeResponse;
use crate::models::AnalysisOutcome;
use anyhow::Result;

/// Render the outcome as the pretty-printed response envelope
pub fn render(outcome: &AnalysisOutcome) -> Result<String> {
    let response = AnalyzeResponse::from_outcome(outcome.clone());
    Ok(serde_json::to_string_pretty(&response)?)
}
