//! Analyzer configuration
//!
//! Thresholds are loaded from an optional `refactoriq.toml` next to the
//! analyzed file (or the working directory), can be overridden per-field
//! with `REFACTORIQ_*` environment variables, and fall back to compiled
//! defaults.
//!
//! ```toml
//! # refactoriq.toml
//! [thresholds]
//! max_function_lines = 50
//! max_nesting_depth = 4
//!
//! [ai]
//! backend = "openai"
//! model = "gpt-4o-mini"
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_MAX_FUNCTION_LINES: usize = 50;
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 4;

/// Detector thresholds
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Functions longer than this (in lines) are flagged
    pub max_function_lines: usize,
    /// Block nesting deeper than this is flagged
    pub max_nesting_depth: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_function_lines: DEFAULT_MAX_FUNCTION_LINES,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// AI enrichment settings (BYOK - keys come from the environment)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Backend name: "openai" or "anthropic"
    pub backend: Option<String>,
    /// Model override (falls back to the backend default)
    pub model: Option<String>,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub ai: AiSettings,
}

impl Config {
    /// Load configuration for a given directory.
    ///
    /// Missing file is not an error; a malformed file is reported and
    /// ignored so a bad config never blocks analysis.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join("refactoriq.toml");
        let mut config = match std::fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str::<Config>(&raw) {
                Ok(config) => {
                    debug!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("ignoring malformed {}: {}", path.display(), e);
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        };
        config.apply_env();
        config
    }

    /// Apply `REFACTORIQ_*` environment overrides
    fn apply_env(&mut self) {
        if let Some(n) = env_usize("REFACTORIQ_MAX_FUNCTION_LINES") {
            self.thresholds.max_function_lines = n;
        }
        if let Some(n) = env_usize("REFACTORIQ_MAX_NESTING_DEPTH") {
            self.thresholds.max_nesting_depth = n;
        }
        if let Ok(model) = std::env::var("REFACTORIQ_AI_MODEL") {
            self.ai.model = Some(model);
        }
    }
}

fn env_usize(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("ignoring non-numeric {key}={raw}");
            None
        }
    }
}
