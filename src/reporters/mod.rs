//! Output reporters for analysis results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - The machine-readable response envelope
//! - `markdown` - GitHub-flavored Markdown

mod json;
mod markdown;
mod text;

use crate::models::AnalysisOutcome;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render an analysis outcome in the specified format
pub fn report(outcome: &AnalysisOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(outcome),
        OutputFormat::Json => json::render(outcome),
        OutputFormat::Markdown => markdown::render(outcome),
    }
}
