//! LLM API client supporting OpenAI and Anthropic backends
//!
//! Provides a unified interface for making API calls to different LLM
//! providers. Uses ureq (sync HTTP) — no async runtime needed.

use crate::ai::{AiError, AiResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Supported LLM backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmBackend {
    #[default]
    OpenAi,
    Anthropic,
}

impl LlmBackend {
    pub fn env_key(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "OPENAI_API_KEY",
            LlmBackend::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "gpt-4o-mini",
            LlmBackend::Anthropic => "claude-sonnet-4-20250514",
        }
    }

    pub fn api_url(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "https://api.openai.com/v1/chat/completions",
            LlmBackend::Anthropic => "https://api.anthropic.com/v1/messages",
        }
    }
}

impl std::str::FromStr for LlmBackend {
    type Err = AiError;

    fn from_str(s: &str) -> AiResult<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LlmBackend::OpenAi),
            "anthropic" => Ok(LlmBackend::Anthropic),
            _ => Err(AiError::ConfigError(format!(
                "Unknown backend '{s}'. Valid backends: openai, anthropic"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub backend: LlmBackend,
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::default(),
            model: None,
            max_tokens: 4096,
            temperature: 0.1,
        }
    }
}

impl AiConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }
}

/// Unified LLM client — sync HTTP via ureq (no tokio needed)
pub struct AiClient {
    config: AiConfig,
    api_key: String,
    agent: ureq::Agent,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // status codes are handled explicitly below
        .timeout_global(Some(std::time::Duration::from_secs(120))) // LLM calls can be slow
        .build()
        .new_agent()
}

impl AiClient {
    pub fn new(config: AiConfig, api_key: impl Into<String>) -> Self {
        Self {
            config,
            api_key: api_key.into(),
            agent: make_agent(),
        }
    }

    pub fn from_env(backend: LlmBackend) -> AiResult<Self> {
        let config = AiConfig {
            backend,
            ..Default::default()
        };
        Self::from_env_with_config(config)
    }

    pub fn from_env_with_config(config: AiConfig) -> AiResult<Self> {
        let env_key = config.backend.env_key();
        let api_key = env::var(env_key).map_err(|_| AiError::MissingApiKey {
            env_var: env_key.to_string(),
        })?;
        Ok(Self::new(config, api_key))
    }

    pub fn backend(&self) -> LlmBackend {
        self.config.backend
    }

    pub fn model(&self) -> &str {
        self.config.model()
    }

    /// Generate a response (sync)
    pub fn generate(&self, messages: Vec<Message>, system: Option<&str>) -> AiResult<String> {
        match self.config.backend {
            LlmBackend::OpenAi => self.generate_openai(messages, system),
            LlmBackend::Anthropic => self.generate_anthropic(messages, system),
        }
    }

    fn generate_openai(
        &self,
        mut messages: Vec<Message>,
        system: Option<&str>,
    ) -> AiResult<String> {
        if let Some(sys) = system {
            messages.insert(0, Message::system(sys));
        }

        let body = OpenAiRequest {
            model: self.config.model().to_string(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .agent
            .post(self.config.backend.api_url())
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&body)
            .map_err(|e| AiError::ApiError {
                status: 0,
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let error_text = response.into_body().read_to_string().unwrap_or_default();
            return Err(AiError::ApiError {
                status,
                message: error_text,
            });
        }

        let resp: OpenAiResponse = response
            .into_body()
            .read_json()
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        resp.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AiError::ParseError("No response choices".to_string()))
    }

    fn generate_anthropic(&self, messages: Vec<Message>, system: Option<&str>) -> AiResult<String> {
        let messages: Vec<_> = messages
            .into_iter()
            .filter(|m| m.role != Role::System)
            .collect();

        let body = AnthropicRequest {
            model: self.config.model().to_string(),
            max_tokens: self.config.max_tokens,
            messages,
            system: system.map(|s| s.to_string()),
            temperature: Some(self.config.temperature),
        };

        let response = self
            .agent
            .post(self.config.backend.api_url())
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .send_json(&body)
            .map_err(|e| AiError::ApiError {
                status: 0,
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let error_text = response.into_body().read_to_string().unwrap_or_default();
            return Err(AiError::ApiError {
                status,
                message: error_text,
            });
        }

        let resp: AnthropicResponse = response
            .into_body()
            .read_json()
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        resp.content
            .into_iter()
            .find(|c| c.content_type == "text")
            .map(|c| c.text)
            .ok_or_else(|| AiError::ParseError("No text content in response".to_string()))
    }
}

// OpenAI API types
#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: String,
}

// Anthropic API types
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    text: String,
}
