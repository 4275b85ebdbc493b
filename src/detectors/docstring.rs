//! Missing docstring detection
//!
//! Only substantial functions (more than three body statements) are
//! flagged, so small helpers stay quiet.

use crate::detectors::{for_each_stmt, Detector, ModuleView};
use crate::models::{Issue, IssueKind, Severity};
use rustpython_parser::ast::{Constant, Expr, Stmt};

/// Body statement count below which a missing docstring is ignored
const MIN_BODY_STATEMENTS: usize = 3;

pub struct MissingDocstringDetector;

impl Detector for MissingDocstringDetector {
    fn name(&self) -> &'static str {
        "missing-docstring"
    }

    fn description(&self) -> &'static str {
        "Detects substantial functions without a docstring"
    }

    fn check(&self, module: &ModuleView<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for_each_stmt(module.suite(), &mut |stmt| {
            let (name, body, start) = match stmt {
                Stmt::FunctionDef(f) => (f.name.as_str(), &f.body, f.range.start()),
                Stmt::AsyncFunctionDef(f) => (f.name.as_str(), &f.body, f.range.start()),
                _ => return,
            };
            if body.len() <= MIN_BODY_STATEMENTS || has_docstring(body) {
                return;
            }
            let line = module.line_of(start);
            issues.push(Issue {
                kind: IssueKind::MissingDocstring,
                severity: Severity::Info,
                message: format!(
                    "Function '{name}' doesn't have a docstring. Docstrings help explain what your function does."
                ),
                line: Some(line),
                suggestion: Some(format!(
                    "Add a docstring to function '{name}' to document its purpose."
                )),
                target: Some(name.to_string()),
            });
        });
        issues
    }
}

/// True when the first body statement is a string literal expression
fn has_docstring(body: &[Stmt]) -> bool {
    let Some(Stmt::Expr(first)) = body.first() else {
        return false;
    };
    matches!(
        first.value.as_ref(),
        Expr::Constant(c) if matches!(c.value, Constant::Str(_))
    )
}
