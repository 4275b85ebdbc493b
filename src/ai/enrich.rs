//! Enrichment: corrected code + explanation from an LLM
//!
//! Wraps the raw client behind [`CodeFixer`]. The model is asked for
//! strict JSON; replies wrapped in markdown fences are unwrapped, and
//! anything that still does not parse is preserved as raw text rather
//! than discarded (the caller decides what to show).

use crate::ai::prompts::{fix_prompt, SYSTEM_PROMPT};
use crate::ai::{AiClient, AiResult, CodeFixer, FixRequest, Message};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// LLM output layered on top of a static analysis result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Unstructured model text, kept when the reply was not valid JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Enrichment {
    pub fn is_structured(&self) -> bool {
        self.fixed_code.is_some()
    }
}

/// Shape the model is instructed to reply with
#[derive(Deserialize)]
struct FixReply {
    fixed_code: String,
    #[serde(default)]
    explanation: Option<String>,
}

/// [`CodeFixer`] backed by a live LLM client
pub struct Enricher {
    client: AiClient,
}

impl Enricher {
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }
}

impl CodeFixer for Enricher {
    fn fix(&self, request: &FixRequest) -> AiResult<Enrichment> {
        let prompt = fix_prompt(request);
        let reply = self
            .client
            .generate(vec![Message::user(prompt)], Some(SYSTEM_PROMPT))?;
        debug!("model replied with {} bytes", reply.len());
        Ok(parse_reply(&reply))
    }
}

/// Parse a model reply into an [`Enrichment`].
///
/// Accepts bare JSON or JSON inside a fenced code block; any other
/// reply is kept verbatim in `raw`.
pub fn parse_reply(reply: &str) -> Enrichment {
    let candidate = strip_fences(reply);
    match serde_json::from_str::<FixReply>(candidate) {
        Ok(parsed) => Enrichment {
            fixed_code: Some(parsed.fixed_code),
            explanation: parsed.explanation,
            raw: None,
        },
        Err(_) => Enrichment {
            fixed_code: None,
            explanation: None,
            raw: Some(reply.to_string()),
        },
    }
}

/// Strip a ``` or ```json fence if the reply is wrapped in one
fn strip_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    rest.strip_suffix("```").map(str::trim).unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_json() {
        let reply = r#"{"fixed_code": "print('hi')", "explanation": "added parens"}"#;
        let enrichment = parse_reply(reply);
        assert_eq!(enrichment.fixed_code.as_deref(), Some("print('hi')"));
        assert_eq!(enrichment.explanation.as_deref(), Some("added parens"));
        assert!(enrichment.raw.is_none());
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "```json\n{\"fixed_code\": \"x = 2\"}\n```";
        let enrichment = parse_reply(reply);
        assert_eq!(enrichment.fixed_code.as_deref(), Some("x = 2"));
        assert!(enrichment.is_structured());
    }

    #[test]
    fn test_unparseable_reply_kept_raw() {
        let reply = "I think your code is mostly fine.";
        let enrichment = parse_reply(reply);
        assert!(enrichment.fixed_code.is_none());
        assert_eq!(enrichment.raw.as_deref(), Some(reply));
        assert!(!enrichment.is_structured());
    }

    #[test]
    fn test_enrichment_serializes_sparsely() {
        let enrichment = Enrichment {
            fixed_code: Some("pass".into()),
            explanation: None,
            raw: None,
        };
        let json = serde_json::to_string(&enrichment).unwrap();
        assert!(json.contains("fixed_code"));
        assert!(!json.contains("explanation"));
        assert!(!json.contains("raw"));
    }
}
