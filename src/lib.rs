//! RefactorIQ - static code quality analysis for Python snippets
//!
//! Parses submitted Python source into an AST, runs a fixed set of
//! shallow quality detectors over it (long functions, unused locals,
//! deep nesting, and a few more), folds the issues into a bounded
//! 0-100 score, and optionally asks an LLM for a corrected version of
//! the code with an explanation.
//!
//! Analysis is a pure function of its input: no state is shared across
//! calls and the only failure mode is a syntax error in the submitted
//! code, which is a value ([`AnalysisOutcome::Paused`]), not a panic.

pub mod ai;
pub mod analyzer;
pub mod api;
pub mod cli;
pub mod config;
pub mod detectors;
pub mod models;
pub mod parsers;
pub mod reporters;
pub mod scoring;

pub use analyzer::{analyze, analyze_with};
pub use models::{
    AnalysisOutcome, AnalysisResult, Issue, IssueKind, Severity, Suggestion, SyntaxFailure,
};
