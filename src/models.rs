//! Core data models for RefactorIQ
//!
//! These models are used throughout the codebase for representing
//! detected issues, suggestions, and analysis results.

use serde::{Deserialize, Serialize};

/// Severity levels for issues
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// The kinds of issues the analyzer can report.
///
/// Serialized in the human-facing spelling the web frontend expects
/// ("Long Function", not "LongFunction").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    #[serde(rename = "Long Function")]
    LongFunction,
    #[serde(rename = "Unused Variable")]
    UnusedVariable,
    #[serde(rename = "Deep Nesting")]
    DeepNesting,
    #[serde(rename = "Unreachable Code")]
    UnreachableCode,
    #[serde(rename = "Constant Condition")]
    ConstantCondition,
    #[serde(rename = "Self Comparison")]
    SelfComparison,
    #[serde(rename = "Missing Docstring")]
    MissingDocstring,
}

impl IssueKind {
    /// Suggestion category this kind of issue maps to
    pub fn suggestion_kind(&self) -> &'static str {
        match self {
            IssueKind::LongFunction => "Extract Function",
            IssueKind::UnusedVariable => "Remove Unused Code",
            IssueKind::DeepNesting => "Reduce Nesting",
            IssueKind::UnreachableCode => "Remove Unreachable Code",
            IssueKind::ConstantCondition | IssueKind::SelfComparison => "Fix Condition",
            IssueKind::MissingDocstring => "Add Docstring",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IssueKind::LongFunction => "Long Function",
            IssueKind::UnusedVariable => "Unused Variable",
            IssueKind::DeepNesting => "Deep Nesting",
            IssueKind::UnreachableCode => "Unreachable Code",
            IssueKind::ConstantCondition => "Constant Condition",
            IssueKind::SelfComparison => "Self Comparison",
            IssueKind::MissingDocstring => "Missing Docstring",
        };
        write!(f, "{s}")
    }
}

/// One detected code-quality concern.
///
/// Immutable once produced; issue order is discovery order during the
/// analysis walk and is never re-sorted or deduplicated across kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    /// 1-based source line, if the issue points at one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Name of the function/variable the issue is about.
    /// Used for suggestion dedup, not part of the wire format.
    #[serde(skip)]
    pub target: Option<String>,
}

/// A refactoring suggestion derived from an issue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// Result of a successful analysis pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub issues: Vec<Issue>,
    /// Quality score in [0, 100]
    pub score: u8,
    pub total_lines: usize,
    pub suggestions: Vec<Suggestion>,
}

impl AnalysisResult {
    /// Count issues at a given severity
    pub fn count_at(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Produced instead of an [`AnalysisResult`] when the input does not parse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxFailure {
    pub message: String,
    /// 1-based line of the parse error; 0 when the parser gave no location
    pub line: u32,
    /// Byte offset of the parse error within the source
    #[serde(skip)]
    pub offset: usize,
}

/// Outcome of analyzing one source submission.
///
/// The two variants are mutually exclusive and exhaustive: an
/// [`AnalysisResult`] exists if and only if parsing succeeded.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    /// Parsing succeeded and the detectors ran
    Completed(AnalysisResult),
    /// Parsing failed; analysis is paused until the code is valid
    Paused(SyntaxFailure),
}

impl AnalysisOutcome {
    pub fn is_paused(&self) -> bool {
        matches!(self, AnalysisOutcome::Paused(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisOutcome::Completed(r) => Some(r),
            AnalysisOutcome::Paused(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_severity_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
    }

    #[test]
    fn test_issue_kind_wire_spelling() {
        let json = serde_json::to_string(&IssueKind::LongFunction).unwrap();
        assert_eq!(json, "\"Long Function\"");
        let back: IssueKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, IssueKind::LongFunction);
    }

    #[test]
    fn test_issue_omits_empty_fields() {
        let issue = Issue {
            kind: IssueKind::DeepNesting,
            severity: Severity::Warning,
            message: "too deep".into(),
            line: None,
            suggestion: None,
            target: None,
        };
        let json = serde_json::to_string(&issue).unwrap();
        assert!(!json.contains("line"));
        assert!(!json.contains("suggestion"));
        assert!(!json.contains("target"));
    }
}
