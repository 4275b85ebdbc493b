//! The JSON request/response contract
//!
//! This is the envelope any transport (CLI today, an HTTP layer as an
//! external collaborator) speaks. Analysis success and syntax failure
//! are both business-level outcomes; only malformed requests are
//! client errors.

use crate::ai::{CodeFixer, Enrichment, FixRequest};
use crate::analyzer;
use crate::config::Thresholds;
use crate::models::{AnalysisOutcome, AnalysisResult, Issue, Suggestion, SyntaxFailure};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// An analysis request as submitted by a client
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub code: String,
    /// Validated against the single supported language
    #[serde(default)]
    pub language: Option<String>,
    /// Free-text description of what the code should do; passed
    /// through to enrichment only
    #[serde(default)]
    pub problem: Option<String>,
}

/// Response envelope for one analysis request
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    /// Parsing and analysis completed
    Success {
        success: bool,
        issues: Vec<Issue>,
        score: u8,
        suggestions: Vec<Suggestion>,
        total_lines: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        fixed_code: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
        /// Unstructured model text when the model ignored the JSON contract
        #[serde(skip_serializing_if = "Option::is_none")]
        raw: Option<String>,
    },
    /// The input did not parse; analysis is paused
    Paused {
        success: bool,
        paused: bool,
        syntax_error: SyntaxFailure,
    },
    /// Malformed request or internal error
    Error { success: bool, error: String },
}

impl AnalyzeResponse {
    pub fn completed(result: AnalysisResult, enrichment: Option<Enrichment>) -> Self {
        let enrichment = enrichment.unwrap_or_default();
        AnalyzeResponse::Success {
            success: true,
            issues: result.issues,
            score: result.score,
            suggestions: result.suggestions,
            total_lines: result.total_lines,
            fixed_code: enrichment.fixed_code,
            explanation: enrichment.explanation,
            raw: enrichment.raw,
        }
    }

    pub fn paused(failure: SyntaxFailure) -> Self {
        AnalyzeResponse::Paused {
            success: false,
            paused: true,
            syntax_error: failure,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        AnalyzeResponse::Error {
            success: false,
            error: message.into(),
        }
    }

    pub fn from_outcome(outcome: AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Completed(result) => Self::completed(result, None),
            AnalysisOutcome::Paused(failure) => Self::paused(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalyzeResponse::Success { .. })
    }
}

/// Handle one analysis request end to end.
///
/// Enrichment is optional and independently failable: when the fixer
/// errors, the static result is returned unchanged and the failure is
/// visible only as the absence of enriched fields.
pub fn handle(
    request: &AnalyzeRequest,
    thresholds: &Thresholds,
    fixer: Option<&dyn CodeFixer>,
) -> AnalyzeResponse {
    if request.code.trim().is_empty() {
        return AnalyzeResponse::error(
            "No code provided. Send Python source in the 'code' field.",
        );
    }
    if let Some(language) = &request.language {
        if !language.eq_ignore_ascii_case("python") {
            return AnalyzeResponse::error(format!(
                "Unsupported language '{language}'. Only Python is supported."
            ));
        }
    }

    let result = match analyzer::analyze_with(&request.code, thresholds) {
        AnalysisOutcome::Completed(result) => result,
        AnalysisOutcome::Paused(failure) => return AnalyzeResponse::paused(failure),
    };

    let enrichment = fixer.and_then(|fixer| {
        let fix_request = FixRequest {
            code: request.code.clone(),
            problem: request.problem.clone(),
            issue_summaries: result.issues.iter().map(|i| i.message.clone()).collect(),
        };
        match fixer.fix(&fix_request) {
            Ok(enrichment) => Some(enrichment),
            Err(e) => {
                warn!("enrichment failed, returning static result only: {e}");
                None
            }
        }
    });

    AnalyzeResponse::completed(result, enrichment)
}
