//! Fix command - analyze, then ask an LLM for a corrected version

use crate::ai::{AiClient, AiConfig, CodeFixer, Enricher, Enrichment, FixRequest, LlmBackend};
use crate::analyzer;
use crate::api::AnalyzeResponse;
use crate::cli::{config_dir, read_source};
use crate::config::Config;
use crate::models::AnalysisOutcome;
use crate::reporters::{self, OutputFormat};
use anyhow::Result;
use console::style;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

pub fn run(
    path: Option<&Path>,
    backend: Option<&str>,
    model: Option<&str>,
    problem: Option<&str>,
    format: &str,
) -> Result<()> {
    let source = read_source(path)?;
    let config = Config::load(&config_dir(path));
    let json = format == "json";

    let outcome = analyzer::analyze_with(&source, &config.thresholds);
    let result = match outcome {
        AnalysisOutcome::Completed(result) => result,
        AnalysisOutcome::Paused(failure) => {
            // nothing to send to the AI until the code parses
            if json {
                let response = AnalyzeResponse::paused(failure);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                let rendered =
                    reporters::report(&AnalysisOutcome::Paused(failure), OutputFormat::Text)?;
                println!("{rendered}");
            }
            return Ok(());
        }
    };

    let enrichment = build_fixer(&config, backend, model).and_then(|fixer| {
        let request = FixRequest {
            code: source.clone(),
            problem: problem.map(str::to_string),
            issue_summaries: result.issues.iter().map(|i| i.message.clone()).collect(),
        };
        match fixer.fix(&request) {
            Ok(enrichment) => Some(enrichment),
            Err(e) => {
                warn!("enrichment failed: {e}");
                eprintln!("AI call failed ({e}); showing static analysis only.");
                None
            }
        }
    });

    if json {
        let response = AnalyzeResponse::completed(result, enrichment);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let rendered = reporters::report(
        &AnalysisOutcome::Completed(result),
        OutputFormat::Text,
    )?;
    println!("{rendered}");
    if let Some(enrichment) = enrichment {
        print_enrichment(&enrichment);
    }
    Ok(())
}

/// Construct the enrichment capability from config + flags.
/// A missing key is not fatal; the static result still prints.
fn build_fixer(
    config: &Config,
    backend: Option<&str>,
    model: Option<&str>,
) -> Option<Box<dyn CodeFixer>> {
    let backend_name = backend
        .map(str::to_string)
        .or_else(|| config.ai.backend.clone())
        .unwrap_or_else(|| "openai".to_string());
    let backend = match LlmBackend::from_str(&backend_name) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("{e}");
            return None;
        }
    };
    let ai_config = AiConfig {
        backend,
        model: model.map(str::to_string).or_else(|| config.ai.model.clone()),
        ..Default::default()
    };
    match AiClient::from_env_with_config(ai_config) {
        Ok(client) => Some(Box::new(Enricher::new(client))),
        Err(e) => {
            eprintln!("{e}; showing static analysis only.");
            None
        }
    }
}

fn print_enrichment(enrichment: &Enrichment) {
    if let Some(explanation) = &enrichment.explanation {
        println!("{}", style("EXPLANATION").bold());
        println!("{explanation}\n");
    }
    if let Some(fixed) = &enrichment.fixed_code {
        println!("{}", style("CORRECTED CODE").bold());
        println!("{fixed}");
    } else if let Some(raw) = &enrichment.raw {
        println!("{}", style("AI RESPONSE").bold());
        println!("{raw}");
    }
}
