//! RefactorIQ - static code quality analysis for Python
//!
//! CLI entry point: analyze pasted or piped Python code, score it, and
//! optionally ask an LLM for a corrected version.

use anyhow::Result;
use clap::Parser;
use refactoriq::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = cli::Cli::parse();
    cli::run(cli)
}
