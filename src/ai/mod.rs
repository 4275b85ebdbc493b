//! AI-powered code correction
//!
//! Optional enrichment layered on top of static analysis: an LLM is
//! asked for a corrected version of the submitted code plus an
//! explanation. BYOK (bring your own key) - API keys are read from
//! environment variables.
//!
//! The analyzer never depends on this module. Callers inject the
//! [`CodeFixer`] capability where they want enrichment; every failure
//! here degrades to the static result alone.
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY`: Required for the OpenAI backend
//! - `ANTHROPIC_API_KEY`: Required for the Anthropic backend

mod client;
mod enrich;
mod prompts;

pub use client::{AiClient, AiConfig, LlmBackend, Message, Role};
pub use enrich::{parse_reply, Enricher, Enrichment};
pub use prompts::{fix_prompt, SYSTEM_PROMPT};

use thiserror::Error;

/// Errors that can occur in the AI module
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Missing API key: {env_var} not set")]
    MissingApiKey { env_var: String },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type AiResult<T> = Result<T, AiError>;

/// What enrichment is asked to correct
#[derive(Debug, Clone)]
pub struct FixRequest {
    /// The submitted source code (already statically analyzed)
    pub code: String,
    /// Optional free-text description of what the code should do
    pub problem: Option<String>,
    /// Messages from the static issues, for prompt context
    pub issue_summaries: Vec<String>,
}

/// The injected enrichment capability.
///
/// The core analysis pipeline is written against this trait so it can
/// be exercised without network access.
pub trait CodeFixer {
    fn fix(&self, request: &FixRequest) -> AiResult<Enrichment>;
}
