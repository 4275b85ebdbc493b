//! CLI command definitions and handlers

mod analyze;
mod doctor;
mod fix;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

/// RefactorIQ - static code quality analysis for Python
#[derive(Parser, Debug)]
#[command(name = "refactoriq")]
#[command(
    version,
    about = "Analyze Python code quality — long functions, unused variables, deep nesting and more",
    long_about = "RefactorIQ parses Python source into an AST and runs a set of shallow \
quality detectors over it, scoring the result from 0 to 100.\n\n\
Optionally, an LLM backend (bring your own key) produces a corrected version of \
the code with an explanation. Static analysis never depends on the network.",
    after_help = "\
Examples:
  refactoriq analyze script.py             Analyze a file
  cat script.py | refactoriq analyze       Analyze stdin
  refactoriq analyze script.py -f json     Machine-readable envelope
  refactoriq analyze script.py --fail-on warning   CI mode
  refactoriq fix script.py                 Analyze, then ask the AI for a corrected version
  refactoriq doctor                        Check AI backends and configuration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze Python source for quality issues
    #[command(after_help = "\
Examples:
  refactoriq analyze script.py                 Analyze a file
  refactoriq analyze - < script.py             Analyze stdin
  refactoriq analyze script.py --format json   JSON envelope for scripting
  refactoriq analyze script.py -o report.md -f markdown")]
    Analyze {
        /// Path to a Python file ('-' or omitted reads stdin)
        path: Option<PathBuf>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown", "md"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit with code 1 if issues at this severity or higher exist
        /// (a syntax failure always trips this)
        #[arg(long, value_parser = ["error", "warning", "info"])]
        fail_on: Option<String>,
    },

    /// Analyze, then ask an LLM for a corrected version with an explanation
    #[command(after_help = "\
Requires an API key in the environment (OPENAI_API_KEY or ANTHROPIC_API_KEY).
When the key is missing or the call fails, the static analysis is still printed.

Examples:
  refactoriq fix script.py
  refactoriq fix script.py --backend anthropic
  refactoriq fix script.py --problem 'sort a list of numbers'")]
    Fix {
        /// Path to a Python file ('-' or omitted reads stdin)
        path: Option<PathBuf>,

        /// LLM backend: openai, anthropic (default from config, else openai)
        #[arg(long)]
        backend: Option<String>,

        /// Model override (default from config, else the backend default)
        #[arg(long)]
        model: Option<String>,

        /// What the code is supposed to do (passed to the AI)
        #[arg(long)]
        problem: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Check environment: AI backends, config file, parser
    Doctor,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            fail_on,
        } => analyze::run(path.as_deref(), &format, output.as_deref(), fail_on.as_deref()),
        Commands::Fix {
            path,
            backend,
            model,
            problem,
            format,
        } => fix::run(
            path.as_deref(),
            backend.as_deref(),
            model.as_deref(),
            problem.as_deref(),
            &format,
        ),
        Commands::Doctor => doctor::run(),
    }
}

/// Read source from a file, or stdin when the path is '-' or absent
pub(crate) fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read from stdin")?;
            Ok(source)
        }
    }
}

/// Directory to search for refactoriq.toml: next to the analyzed file,
/// else the working directory
pub(crate) fn config_dir(path: Option<&Path>) -> PathBuf {
    path.and_then(|p| p.parent())
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
