//! Python parser built on rustpython-parser
//!
//! Parses submitted source into a module AST. On success the analyzer
//! walks the returned suite; on failure the parse error is converted to
//! a [`SyntaxFailure`] carrying the parser's message, the byte offset,
//! and the derived 1-based line.

use crate::models::SyntaxFailure;
use line_numbers::LinePositions;
use rustpython_parser::ast::{Mod, Suite};
use rustpython_parser::{parse, Mode, ParseError};

/// A successfully parsed Python module plus the offset→line index for it
#[derive(Debug)]
pub struct ParsedModule {
    pub suite: Suite,
    lines: LinePositions,
    source_len: usize,
}

impl ParsedModule {
    /// Convert a byte offset from an AST node range to a 1-based line.
    ///
    /// End offsets of the last node sit one past the final byte; they are
    /// clamped back onto the last line.
    pub fn line_of(&self, offset: impl Into<usize>) -> u32 {
        if self.source_len == 0 {
            return 1;
        }
        let offset = offset.into().min(self.source_len - 1);
        self.lines.from_offset(offset).as_usize() as u32 + 1
    }
}

/// Parse Python source text into a module AST.
///
/// All inputs either parse (including empty source, which parses to an
/// empty suite) or produce exactly one [`SyntaxFailure`].
pub fn parse_module(source: &str) -> Result<ParsedModule, SyntaxFailure> {
    match parse(source, Mode::Module, "<string>") {
        Ok(Mod::Module(module)) => Ok(ParsedModule {
            suite: module.body,
            lines: LinePositions::from(source),
            source_len: source.len(),
        }),
        // Mode::Module only ever yields Mod::Module
        Ok(_) => Ok(ParsedModule {
            suite: Vec::new(),
            lines: LinePositions::from(source),
            source_len: source.len(),
        }),
        Err(e) => Err(syntax_failure(e, source)),
    }
}

fn syntax_failure(e: ParseError, source: &str) -> SyntaxFailure {
    let offset = usize::from(e.offset);
    let line = if source.is_empty() {
        0
    } else {
        // Parse errors at EOF report an offset one past the last byte
        let clamped = offset.min(source.len().saturating_sub(1));
        LinePositions::from(source)
            .from_offset(clamped)
            .as_usize() as u32
            + 1
    };
    SyntaxFailure {
        message: e.error.to_string(),
        line,
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_source() {
        let parsed = parse_module("x = 1\nprint(x)\n").expect("valid source");
        assert_eq!(parsed.suite.len(), 2);
    }

    #[test]
    fn test_parse_empty_source() {
        let parsed = parse_module("").expect("empty source parses");
        assert!(parsed.suite.is_empty());
    }

    #[test]
    fn test_mismatched_parens_fail() {
        let failure = parse_module("def f(:\n    pass\n").expect_err("must not parse");
        assert!(!failure.message.is_empty());
        assert!(failure.line >= 1);
    }

    #[test]
    fn test_bad_indent_reports_line() {
        let failure = parse_module("def f():\npass_here = 1\n  x = 2\n").expect_err("bad indent");
        assert!(!failure.message.is_empty());
    }

    #[test]
    fn test_error_at_eof_is_clamped() {
        // unterminated expression errors at end of input
        let failure = parse_module("x = (").expect_err("unterminated");
        assert!(failure.line >= 1);
        assert!(failure.offset <= 5);
    }

    #[test]
    fn test_line_of_maps_offsets() {
        let parsed = parse_module("a = 1\nb = 2\n").expect("valid");
        use rustpython_parser::ast::Ranged;
        let second = &parsed.suite[1];
        assert_eq!(parsed.line_of(second.range().start()), 2);
    }
}
