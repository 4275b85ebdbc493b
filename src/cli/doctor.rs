//! Doctor command - check environment

use crate::parsers::parse_module;
use anyhow::Result;
use std::path::Path;

pub fn run() -> Result<()> {
    println!("RefactorIQ Doctor\n");

    // Parser self-check
    match parse_module("x = 1\n") {
        Ok(_) => println!("✓ Python parser: OK"),
        Err(e) => println!("✗ Python parser: {}", e.message),
    }

    // Config file
    if Path::new("refactoriq.toml").exists() {
        println!("✓ Config: refactoriq.toml found");
    } else {
        println!("○ Config: no refactoriq.toml (using defaults)");
    }

    // AI providers (all optional - BYOK)
    let has_openai = std::env::var("OPENAI_API_KEY").is_ok();
    let has_anthropic = std::env::var("ANTHROPIC_API_KEY").is_ok();

    if has_openai || has_anthropic {
        let mut providers = Vec::new();
        if has_openai {
            providers.push("OpenAI");
        }
        if has_anthropic {
            providers.push("Anthropic");
        }
        println!("✓ AI providers: {} (fix command enabled)", providers.join(", "));
    } else {
        println!("○ AI providers: none configured");
        println!("  Set OPENAI_API_KEY or ANTHROPIC_API_KEY to enable `refactoriq fix`");
    }

    Ok(())
}
