//! Source parsers
//!
//! Only Python is supported. The parser produces a real AST with real
//! syntax errors (line + byte offset), which is what lets the analyzer
//! pause instead of guessing at broken input.

pub mod python;

pub use python::{parse_module, ParsedModule};
