//! Unreachable code detection
//!
//! Flags statements that follow a `return`, `raise`, `break` or
//! `continue` in the same block. Only blocks inside functions are
//! checked; module-level code after a raise is left to the runtime.

use crate::detectors::{for_each_stmt, Detector, ModuleView};
use crate::models::{Issue, IssueKind, Severity};
use rustpython_parser::ast::{ExceptHandler, Ranged, Stmt};

pub struct UnreachableCodeDetector;

impl Detector for UnreachableCodeDetector {
    fn name(&self) -> &'static str {
        "unreachable-code"
    }

    fn description(&self) -> &'static str {
        "Detects code after return, raise, break or continue"
    }

    fn check(&self, module: &ModuleView<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for_each_stmt(module.suite(), &mut |stmt| match stmt {
            Stmt::FunctionDef(f) => check_blocks(&f.body, module, &mut issues),
            Stmt::AsyncFunctionDef(f) => check_blocks(&f.body, module, &mut issues),
            _ => {}
        });
        issues
    }
}

/// What kind of statement cut the block short
fn terminator(stmt: &Stmt) -> Option<&'static str> {
    match stmt {
        Stmt::Return(_) => Some("return"),
        Stmt::Raise(_) => Some("raise"),
        Stmt::Break(_) => Some("break"),
        Stmt::Continue(_) => Some("continue"),
        _ => None,
    }
}

/// Scan one function's blocks. Nested function bodies are skipped here;
/// the detector visits them as functions in their own right.
fn check_blocks(stmts: &[Stmt], module: &ModuleView<'_>, issues: &mut Vec<Issue>) {
    check_block(stmts, module, issues);
    for stmt in stmts {
        match stmt {
            Stmt::FunctionDef(_) | Stmt::AsyncFunctionDef(_) => {}
            Stmt::If(s) => {
                check_blocks(&s.body, module, issues);
                check_blocks(&s.orelse, module, issues);
            }
            Stmt::For(s) => {
                check_blocks(&s.body, module, issues);
                check_blocks(&s.orelse, module, issues);
            }
            Stmt::AsyncFor(s) => {
                check_blocks(&s.body, module, issues);
                check_blocks(&s.orelse, module, issues);
            }
            Stmt::While(s) => {
                check_blocks(&s.body, module, issues);
                check_blocks(&s.orelse, module, issues);
            }
            Stmt::With(s) => check_blocks(&s.body, module, issues),
            Stmt::AsyncWith(s) => check_blocks(&s.body, module, issues),
            Stmt::Try(s) => {
                check_blocks(&s.body, module, issues);
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    check_blocks(&h.body, module, issues);
                }
                check_blocks(&s.orelse, module, issues);
                check_blocks(&s.finalbody, module, issues);
            }
            _ => {}
        }
    }
}

/// Flag the first statement after a terminator in one block
fn check_block(stmts: &[Stmt], module: &ModuleView<'_>, issues: &mut Vec<Issue>) {
    for window in stmts.windows(2) {
        let Some(kind) = terminator(&window[0]) else {
            continue;
        };
        let term_line = module.line_of(window[0].range().start());
        let line = module.line_of(window[1].range().start());
        issues.push(Issue {
            kind: IssueKind::UnreachableCode,
            severity: Severity::Warning,
            message: format!(
                "Code on line {line} will never execute because of the {kind} statement on line {term_line}."
            ),
            line: Some(line),
            suggestion: Some(
                "Remove unreachable code or restructure your logic to make it reachable."
                    .to_string(),
            ),
            target: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::tests::check_with;

    #[test]
    fn test_code_after_return() {
        let source = "def f():\n    return 1\n    print('never')\n";
        let issues = check_with(&UnreachableCodeDetector, source);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::UnreachableCode);
        assert_eq!(issues[0].line, Some(3));
        assert!(issues[0].message.contains("return"));
    }

    #[test]
    fn test_code_after_continue_in_loop() {
        let source = "def f(items):\n    for i in items:\n        continue\n        print(i)\n";
        let issues = check_with(&UnreachableCodeDetector, source);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, Some(4));
    }

    #[test]
    fn test_return_as_last_statement_is_clean() {
        let source = "def f():\n    x = 1\n    return x\n";
        let issues = check_with(&UnreachableCodeDetector, source);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_module_level_is_not_checked() {
        let source = "raise SystemExit\nprint('after')\n";
        let issues = check_with(&UnreachableCodeDetector, source);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_each_function_reported_once() {
        // two functions, one unreachable statement each
        let source = "\
def f():
    return 1
    a = 2

def g():
    raise ValueError()
    b = 3
";
        let issues = check_with(&UnreachableCodeDetector, source);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].line, Some(3));
        assert_eq!(issues[1].line, Some(7));
    }
}
