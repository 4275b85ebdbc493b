//! Base detector trait and the fixed detector registry
//!
//! Each detector is one shallow rule over the parsed module. Detectors
//! run in registry order and append issues in the order the triggering
//! construct is visited (top-down, outer-to-inner, left-to-right), so
//! the combined issue list is deterministic for a given input.

mod conditions;
mod docstring;
mod function_audit;
mod unreachable;

pub use conditions::{ConstantConditionDetector, SelfComparisonDetector};
pub use docstring::MissingDocstringDetector;
pub use function_audit::FunctionAuditDetector;
pub use unreachable::UnreachableCodeDetector;

use crate::config::Thresholds;
use crate::models::Issue;
use crate::parsers::ParsedModule;
use rustpython_parser::ast::{ExceptHandler, Stmt, Suite};
use tracing::debug;

/// Read-only view of one parsed submission handed to every detector
pub struct ModuleView<'a> {
    pub parsed: &'a ParsedModule,
    pub source: &'a str,
    pub thresholds: &'a Thresholds,
}

impl ModuleView<'_> {
    pub fn suite(&self) -> &Suite {
        &self.parsed.suite
    }

    /// 1-based line for a byte offset taken from an AST node range
    pub fn line_of(&self, offset: impl Into<usize>) -> u32 {
        self.parsed.line_of(offset)
    }
}

/// Trait for all code-quality detectors
pub trait Detector: Send + Sync {
    /// Unique identifier for this detector
    fn name(&self) -> &'static str;

    /// Human-readable description of what this detector finds
    fn description(&self) -> &'static str;

    /// Run detection over the module and return issues in discovery order
    fn check(&self, module: &ModuleView<'_>) -> Vec<Issue>;
}

/// The full detector set, in the order the analyzer runs them.
///
/// The order is part of the output contract: issues from earlier
/// detectors come first, and nothing downstream re-sorts them.
pub fn registry() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(ConstantConditionDetector),
        Box::new(SelfComparisonDetector),
        Box::new(UnreachableCodeDetector),
        Box::new(MissingDocstringDetector),
        Box::new(FunctionAuditDetector),
    ]
}

/// Run every registered detector over the module
pub fn run_all(module: &ModuleView<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    for detector in registry() {
        let found = detector.check(module);
        debug!("{} found {} issues", detector.name(), found.len());
        issues.extend(found);
    }
    issues
}

/// Visit every statement in the suite recursively, in source order.
///
/// Descends into every block body, including class and function bodies.
/// Callers match on the node kinds they care about; everything else
/// falls through with no effect.
pub(crate) fn for_each_stmt<'a>(stmts: &'a [Stmt], f: &mut impl FnMut(&'a Stmt)) {
    for stmt in stmts {
        f(stmt);
        match stmt {
            Stmt::FunctionDef(s) => for_each_stmt(&s.body, f),
            Stmt::AsyncFunctionDef(s) => for_each_stmt(&s.body, f),
            Stmt::ClassDef(s) => for_each_stmt(&s.body, f),
            Stmt::If(s) => {
                for_each_stmt(&s.body, f);
                for_each_stmt(&s.orelse, f);
            }
            Stmt::For(s) => {
                for_each_stmt(&s.body, f);
                for_each_stmt(&s.orelse, f);
            }
            Stmt::AsyncFor(s) => {
                for_each_stmt(&s.body, f);
                for_each_stmt(&s.orelse, f);
            }
            Stmt::While(s) => {
                for_each_stmt(&s.body, f);
                for_each_stmt(&s.orelse, f);
            }
            Stmt::With(s) => for_each_stmt(&s.body, f),
            Stmt::AsyncWith(s) => for_each_stmt(&s.body, f),
            Stmt::Try(s) => {
                for_each_stmt(&s.body, f);
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    for_each_stmt(&h.body, f);
                }
                for_each_stmt(&s.orelse, f);
                for_each_stmt(&s.finalbody, f);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::parsers::parse_module;

    /// Parse a snippet and run one detector over it
    pub(crate) fn check_with(detector: &dyn Detector, source: &str) -> Vec<Issue> {
        let parsed = parse_module(source).expect("test source must parse");
        let thresholds = Thresholds::default();
        let view = ModuleView {
            parsed: &parsed,
            source,
            thresholds: &thresholds,
        };
        detector.check(&view)
    }

    #[test]
    fn test_registry_order_is_stable() {
        let names: Vec<&str> = registry().iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            vec![
                "constant-condition",
                "self-comparison",
                "unreachable-code",
                "missing-docstring",
                "function-audit",
            ]
        );
    }

    #[test]
    fn test_for_each_stmt_visits_nested() {
        let parsed = parse_module(
            "def outer():\n    if a:\n        def inner():\n            pass\n",
        )
        .expect("parses");
        let mut count = 0;
        for_each_stmt(&parsed.suite, &mut |_| count += 1);
        // outer def, if, inner def, pass
        assert_eq!(count, 4);
    }
}
