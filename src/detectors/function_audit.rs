//! Function-scope audit: length, unused locals, nesting depth
//!
//! One walk over every function definition, outermost first. For each
//! function the audit emits, in order: the length check, unused locals
//! in assignment order, then the nesting-depth check, and only then
//! descends into nested definitions. Scope tracking uses an explicit
//! per-scope accumulator merged over the traversal; nothing is shared
//! between functions or between calls.

use crate::detectors::{Detector, ModuleView};
use crate::models::{Issue, IssueKind, Severity};
use rustpython_parser::ast::{
    Arguments, Comprehension, ExceptHandler, Expr, ExprContext, Stmt,
};
use std::collections::HashSet;

/// Names never reported as unused even when assigned and not read
const SKIP_NAMES: &[&str] = &["self", "cls", "args", "kwargs"];

pub struct FunctionAuditDetector;

impl Detector for FunctionAuditDetector {
    fn name(&self) -> &'static str {
        "function-audit"
    }

    fn description(&self) -> &'static str {
        "Detects long functions, unused locals and deep nesting"
    }

    fn check(&self, module: &ModuleView<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        audit_block(module.suite(), module, &mut issues);
        issues
    }
}

/// Find function definitions in source order and audit each one.
/// Class bodies and block statements are descended; a function's own
/// body is handled by [`audit_function`].
fn audit_block(stmts: &[Stmt], module: &ModuleView<'_>, issues: &mut Vec<Issue>) {
    for stmt in stmts {
        match stmt {
            Stmt::FunctionDef(f) => {
                let start = module.line_of(f.range.start());
                let end = module.line_of(f.range.end());
                audit_function(f.name.as_str(), start, end, &f.body, module, issues);
            }
            Stmt::AsyncFunctionDef(f) => {
                let start = module.line_of(f.range.start());
                let end = module.line_of(f.range.end());
                audit_function(f.name.as_str(), start, end, &f.body, module, issues);
            }
            Stmt::ClassDef(c) => audit_block(&c.body, module, issues),
            Stmt::If(s) => {
                audit_block(&s.body, module, issues);
                audit_block(&s.orelse, module, issues);
            }
            Stmt::For(s) => {
                audit_block(&s.body, module, issues);
                audit_block(&s.orelse, module, issues);
            }
            Stmt::AsyncFor(s) => {
                audit_block(&s.body, module, issues);
                audit_block(&s.orelse, module, issues);
            }
            Stmt::While(s) => {
                audit_block(&s.body, module, issues);
                audit_block(&s.orelse, module, issues);
            }
            Stmt::With(s) => audit_block(&s.body, module, issues),
            Stmt::AsyncWith(s) => audit_block(&s.body, module, issues),
            Stmt::Try(s) => {
                audit_block(&s.body, module, issues);
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    audit_block(&h.body, module, issues);
                }
                audit_block(&s.orelse, module, issues);
                audit_block(&s.finalbody, module, issues);
            }
            _ => {}
        }
    }
}

fn audit_function(
    name: &str,
    start_line: u32,
    end_line: u32,
    body: &[Stmt],
    module: &ModuleView<'_>,
    issues: &mut Vec<Issue>,
) {
    // Length check
    let span = (end_line.saturating_sub(start_line) + 1) as usize;
    if span > module.thresholds.max_function_lines {
        issues.push(Issue {
            kind: IssueKind::LongFunction,
            severity: Severity::Warning,
            message: format!(
                "Function '{name}' has {span} lines, which is longer than recommended ({} lines). Long functions are harder to read and understand.",
                module.thresholds.max_function_lines
            ),
            line: Some(start_line),
            suggestion: Some(format!(
                "Split '{name}' into smaller, simpler functions that each do one thing."
            )),
            target: Some(name.to_string()),
        });
    }

    // Unused locals, in assignment order
    let mut scope = Scope::default();
    scan_block(body, &mut scope, module, true);
    for (var, line) in &scope.assigned {
        if scope.reads.contains(var) {
            continue;
        }
        if var.starts_with('_') || SKIP_NAMES.contains(&var.as_str()) {
            continue;
        }
        issues.push(Issue {
            kind: IssueKind::UnusedVariable,
            severity: Severity::Info,
            message: format!(
                "Variable '{var}' is assigned on line {line} but never used in function '{name}'. Remove it to keep your code clean."
            ),
            line: Some(*line),
            suggestion: Some(format!(
                "Delete the variable '{var}' if you don't need it, or use it somewhere in your code."
            )),
            target: Some(var.clone()),
        });
    }

    // Nesting depth
    let mut deepest = Deepest {
        depth: 0,
        line: start_line,
    };
    max_nesting(body, 0, &mut deepest, module);
    if deepest.depth > module.thresholds.max_nesting_depth {
        issues.push(Issue {
            kind: IssueKind::DeepNesting,
            severity: Severity::Warning,
            message: format!(
                "Function '{name}' has {} levels of nested blocks, which is deeper than recommended ({}). This makes the code hard to follow.",
                deepest.depth, module.thresholds.max_nesting_depth
            ),
            line: Some(deepest.line),
            suggestion: Some(format!(
                "Use early returns or move nested code from '{name}' into helper functions."
            )),
            target: Some(name.to_string()),
        });
    }

    // Nested definitions are audited as functions in their own right
    audit_block(body, module, issues);
}

/// Per-scope accumulator for the unused-locals check
#[derive(Default)]
struct Scope {
    /// Bindings in first-assignment order, with the assignment line
    assigned: Vec<(String, u32)>,
    known: HashSet<String>,
    reads: HashSet<String>,
}

impl Scope {
    fn assign(&mut self, name: &str, line: u32) {
        if self.known.insert(name.to_string()) {
            self.assigned.push((name.to_string(), line));
        }
    }

    fn read(&mut self, name: &str) {
        self.reads.insert(name.to_string());
    }
}

/// Walk one statement list collecting reads and (when `stores` is set)
/// writes into the scope. Nested function and class bodies are walked
/// with `stores` off: reads inside a closure keep an outer binding
/// alive, while its assignments belong to the inner scope.
fn scan_block(stmts: &[Stmt], scope: &mut Scope, module: &ModuleView<'_>, stores: bool) {
    for stmt in stmts {
        match stmt {
            Stmt::Assign(s) => {
                for target in &s.targets {
                    scan_target(target, scope, module, stores);
                }
                scan_expr(&s.value, scope, module, stores);
            }
            Stmt::AugAssign(s) => {
                // x += 1 both reads and writes x
                if let Expr::Name(n) = s.target.as_ref() {
                    scope.read(n.id.as_str());
                }
                scan_target(&s.target, scope, module, stores);
                scan_expr(&s.value, scope, module, stores);
            }
            Stmt::AnnAssign(s) => {
                scan_expr(&s.annotation, scope, module, stores);
                // a bare annotation (`x: int`) does not bind a value
                if let Some(value) = &s.value {
                    scan_target(&s.target, scope, module, stores);
                    scan_expr(value, scope, module, stores);
                }
            }
            Stmt::For(s) => {
                scan_expr(&s.iter, scope, module, stores);
                scan_target(&s.target, scope, module, stores);
                scan_block(&s.body, scope, module, stores);
                scan_block(&s.orelse, scope, module, stores);
            }
            Stmt::AsyncFor(s) => {
                scan_expr(&s.iter, scope, module, stores);
                scan_target(&s.target, scope, module, stores);
                scan_block(&s.body, scope, module, stores);
                scan_block(&s.orelse, scope, module, stores);
            }
            Stmt::While(s) => {
                scan_expr(&s.test, scope, module, stores);
                scan_block(&s.body, scope, module, stores);
                scan_block(&s.orelse, scope, module, stores);
            }
            Stmt::If(s) => {
                scan_expr(&s.test, scope, module, stores);
                scan_block(&s.body, scope, module, stores);
                scan_block(&s.orelse, scope, module, stores);
            }
            Stmt::With(s) => {
                for item in &s.items {
                    scan_expr(&item.context_expr, scope, module, stores);
                    if let Some(vars) = &item.optional_vars {
                        scan_target(vars, scope, module, stores);
                    }
                }
                scan_block(&s.body, scope, module, stores);
            }
            Stmt::AsyncWith(s) => {
                for item in &s.items {
                    scan_expr(&item.context_expr, scope, module, stores);
                    if let Some(vars) = &item.optional_vars {
                        scan_target(vars, scope, module, stores);
                    }
                }
                scan_block(&s.body, scope, module, stores);
            }
            Stmt::Try(s) => {
                scan_block(&s.body, scope, module, stores);
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    if let Some(exc_type) = &h.type_ {
                        scan_expr(exc_type, scope, module, stores);
                    }
                    if let (Some(exc_name), true) = (&h.name, stores) {
                        scope.assign(exc_name.as_str(), module.line_of(h.range.start()));
                    }
                    scan_block(&h.body, scope, module, stores);
                }
                scan_block(&s.orelse, scope, module, stores);
                scan_block(&s.finalbody, scope, module, stores);
            }
            Stmt::Return(s) => {
                if let Some(value) = &s.value {
                    scan_expr(value, scope, module, stores);
                }
            }
            Stmt::Raise(s) => {
                if let Some(exc) = &s.exc {
                    scan_expr(exc, scope, module, stores);
                }
                if let Some(cause) = &s.cause {
                    scan_expr(cause, scope, module, stores);
                }
            }
            Stmt::Assert(s) => {
                scan_expr(&s.test, scope, module, stores);
                if let Some(msg) = &s.msg {
                    scan_expr(msg, scope, module, stores);
                }
            }
            Stmt::Expr(s) => scan_expr(&s.value, scope, module, stores),
            Stmt::FunctionDef(f) => {
                for dec in &f.decorator_list {
                    scan_expr(dec, scope, module, stores);
                }
                scan_defaults(&f.args, scope, module, stores);
                scan_block(&f.body, scope, module, false);
            }
            Stmt::AsyncFunctionDef(f) => {
                for dec in &f.decorator_list {
                    scan_expr(dec, scope, module, stores);
                }
                scan_defaults(&f.args, scope, module, stores);
                scan_block(&f.body, scope, module, false);
            }
            Stmt::ClassDef(c) => {
                for dec in &c.decorator_list {
                    scan_expr(dec, scope, module, stores);
                }
                for base in &c.bases {
                    scan_expr(base, scope, module, stores);
                }
                scan_block(&c.body, scope, module, false);
            }
            _ => {}
        }
    }
}

/// Parameter defaults evaluate in the enclosing scope
fn scan_defaults(args: &Arguments, scope: &mut Scope, module: &ModuleView<'_>, stores: bool) {
    for arg in args
        .posonlyargs
        .iter()
        .chain(&args.args)
        .chain(&args.kwonlyargs)
    {
        if let Some(default) = &arg.default {
            scan_expr(default, scope, module, stores);
        }
    }
}

/// Record writes from an assignment target. Attribute and subscript
/// targets do not bind locals; their bases are reads.
fn scan_target(expr: &Expr, scope: &mut Scope, module: &ModuleView<'_>, stores: bool) {
    match expr {
        Expr::Name(n) => {
            if stores {
                scope.assign(n.id.as_str(), module.line_of(n.range.start()));
            }
        }
        Expr::Tuple(t) => {
            for elt in &t.elts {
                scan_target(elt, scope, module, stores);
            }
        }
        Expr::List(l) => {
            for elt in &l.elts {
                scan_target(elt, scope, module, stores);
            }
        }
        Expr::Starred(s) => scan_target(&s.value, scope, module, stores),
        Expr::Attribute(a) => scan_expr(&a.value, scope, module, stores),
        Expr::Subscript(s) => {
            scan_expr(&s.value, scope, module, stores);
            scan_expr(&s.slice, scope, module, stores);
        }
        _ => {}
    }
}

/// Record every name read inside an expression
fn scan_expr(expr: &Expr, scope: &mut Scope, module: &ModuleView<'_>, stores: bool) {
    match expr {
        Expr::Name(n) => {
            if matches!(n.ctx, ExprContext::Load) {
                scope.read(n.id.as_str());
            }
        }
        Expr::NamedExpr(e) => {
            // walrus binds in the enclosing function scope
            scan_target(&e.target, scope, module, stores);
            scan_expr(&e.value, scope, module, stores);
        }
        Expr::BoolOp(e) => {
            for value in &e.values {
                scan_expr(value, scope, module, stores);
            }
        }
        Expr::BinOp(e) => {
            scan_expr(&e.left, scope, module, stores);
            scan_expr(&e.right, scope, module, stores);
        }
        Expr::UnaryOp(e) => scan_expr(&e.operand, scope, module, stores),
        Expr::Lambda(e) => {
            scan_defaults(&e.args, scope, module, stores);
            scan_expr(&e.body, scope, module, false);
        }
        Expr::IfExp(e) => {
            scan_expr(&e.test, scope, module, stores);
            scan_expr(&e.body, scope, module, stores);
            scan_expr(&e.orelse, scope, module, stores);
        }
        Expr::Dict(e) => {
            for key in e.keys.iter().flatten() {
                scan_expr(key, scope, module, stores);
            }
            for value in &e.values {
                scan_expr(value, scope, module, stores);
            }
        }
        Expr::Set(e) => {
            for elt in &e.elts {
                scan_expr(elt, scope, module, stores);
            }
        }
        Expr::ListComp(e) => {
            scan_comprehensions(&e.generators, scope, module, stores);
            scan_expr(&e.elt, scope, module, false);
        }
        Expr::SetComp(e) => {
            scan_comprehensions(&e.generators, scope, module, stores);
            scan_expr(&e.elt, scope, module, false);
        }
        Expr::DictComp(e) => {
            scan_comprehensions(&e.generators, scope, module, stores);
            scan_expr(&e.key, scope, module, false);
            scan_expr(&e.value, scope, module, false);
        }
        Expr::GeneratorExp(e) => {
            scan_comprehensions(&e.generators, scope, module, stores);
            scan_expr(&e.elt, scope, module, false);
        }
        Expr::Await(e) => scan_expr(&e.value, scope, module, stores),
        Expr::Yield(e) => {
            if let Some(value) = &e.value {
                scan_expr(value, scope, module, stores);
            }
        }
        Expr::YieldFrom(e) => scan_expr(&e.value, scope, module, stores),
        Expr::Compare(e) => {
            scan_expr(&e.left, scope, module, stores);
            for comparator in &e.comparators {
                scan_expr(comparator, scope, module, stores);
            }
        }
        Expr::Call(e) => {
            scan_expr(&e.func, scope, module, stores);
            for arg in &e.args {
                scan_expr(arg, scope, module, stores);
            }
            for keyword in &e.keywords {
                scan_expr(&keyword.value, scope, module, stores);
            }
        }
        Expr::FormattedValue(e) => {
            scan_expr(&e.value, scope, module, stores);
            if let Some(spec) = &e.format_spec {
                scan_expr(spec, scope, module, stores);
            }
        }
        Expr::JoinedStr(e) => {
            for value in &e.values {
                scan_expr(value, scope, module, stores);
            }
        }
        Expr::Attribute(e) => scan_expr(&e.value, scope, module, stores),
        Expr::Subscript(e) => {
            scan_expr(&e.value, scope, module, stores);
            scan_expr(&e.slice, scope, module, stores);
        }
        Expr::Starred(e) => scan_expr(&e.value, scope, module, stores),
        Expr::List(e) => {
            for elt in &e.elts {
                scan_expr(elt, scope, module, stores);
            }
        }
        Expr::Tuple(e) => {
            for elt in &e.elts {
                scan_expr(elt, scope, module, stores);
            }
        }
        Expr::Slice(e) => {
            for part in [&e.lower, &e.upper, &e.step].into_iter().flatten() {
                scan_expr(part, scope, module, stores);
            }
        }
        _ => {}
    }
}

/// Comprehension targets bind in the comprehension's own scope
fn scan_comprehensions(
    generators: &[Comprehension],
    scope: &mut Scope,
    module: &ModuleView<'_>,
    stores: bool,
) {
    for generator in generators {
        scan_expr(&generator.iter, scope, module, stores);
        scan_target(&generator.target, scope, module, false);
        for cond in &generator.ifs {
            scan_expr(cond, scope, module, false);
        }
    }
}

struct Deepest {
    depth: usize,
    line: u32,
}

/// Max depth of nested `if`/`for`/`while`/`with`/`try` blocks.
/// Nested definitions start their own count and are skipped here.
fn max_nesting(stmts: &[Stmt], depth: usize, deepest: &mut Deepest, module: &ModuleView<'_>) {
    for stmt in stmts {
        let (line, blocks): (u32, Vec<&[Stmt]>) = match stmt {
            Stmt::If(s) => (
                module.line_of(s.range.start()),
                vec![&s.body, &s.orelse],
            ),
            Stmt::For(s) => (
                module.line_of(s.range.start()),
                vec![&s.body, &s.orelse],
            ),
            Stmt::AsyncFor(s) => (
                module.line_of(s.range.start()),
                vec![&s.body, &s.orelse],
            ),
            Stmt::While(s) => (
                module.line_of(s.range.start()),
                vec![&s.body, &s.orelse],
            ),
            Stmt::With(s) => (module.line_of(s.range.start()), vec![&s.body]),
            Stmt::AsyncWith(s) => (module.line_of(s.range.start()), vec![&s.body]),
            Stmt::Try(s) => {
                let mut blocks: Vec<&[Stmt]> = vec![&s.body, &s.orelse, &s.finalbody];
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    blocks.push(&h.body);
                }
                (module.line_of(s.range.start()), blocks)
            }
            _ => continue,
        };

        let d = depth + 1;
        if d > deepest.depth {
            deepest.depth = d;
            deepest.line = line;
        }
        for block in blocks {
            max_nesting(block, d, deepest, module);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::tests::check_with;

    fn kinds(issues: &[Issue]) -> Vec<IssueKind> {
        issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_long_function_at_threshold_is_clean() {
        // def line + 49 body lines = span of exactly 50
        let mut source = String::from("def f(x):\n");
        for i in 0..48 {
            source.push_str(&format!("    x = x + {i}\n"));
        }
        source.push_str("    return x\n");
        let issues = check_with(&FunctionAuditDetector, &source);
        assert!(!kinds(&issues).contains(&IssueKind::LongFunction));
    }

    #[test]
    fn test_long_function_over_threshold() {
        // def line + 51 body lines = span of 52
        let mut source = String::from("def f(x):\n");
        for i in 0..50 {
            source.push_str(&format!("    x = x + {i}\n"));
        }
        source.push_str("    return x\n");
        let issues = check_with(&FunctionAuditDetector, &source);
        let long: Vec<_> = issues
            .iter()
            .filter(|i| i.kind == IssueKind::LongFunction)
            .collect();
        assert_eq!(long.len(), 1);
        assert_eq!(long[0].severity, Severity::Warning);
        assert_eq!(long[0].line, Some(1));
        assert!(long[0].message.contains("'f'"));
        assert!(long[0].message.contains("52 lines"));
    }

    #[test]
    fn test_unused_variable_reported_once() {
        let source = "def f(a):\n    leftover = a * 2\n    return a\n";
        let issues = check_with(&FunctionAuditDetector, source);
        assert_eq!(kinds(&issues), vec![IssueKind::UnusedVariable]);
        assert_eq!(issues[0].line, Some(2));
        assert!(issues[0].message.contains("'leftover'"));
        assert_eq!(issues[0].severity, Severity::Info);
    }

    #[test]
    fn test_used_variable_is_clean() {
        let source = "def f(a):\n    total = a * 2\n    return total\n";
        let issues = check_with(&FunctionAuditDetector, source);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_underscore_and_self_are_skipped() {
        let source = "\
def f(a):
    _ignored = a
    self = a
    return a
";
        let issues = check_with(&FunctionAuditDetector, source);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_closure_read_keeps_binding_alive() {
        let source = "\
def outer():
    captured = 1
    def inner():
        return captured
    return inner
";
        let issues = check_with(&FunctionAuditDetector, source);
        assert!(kinds(&issues).is_empty());
    }

    #[test]
    fn test_nesting_at_threshold_is_clean() {
        let source = "\
def f(a):
    if a > 1:
        if a > 2:
            if a > 3:
                if a > 4:
                    return a
    return 0
";
        let issues = check_with(&FunctionAuditDetector, source);
        assert!(!kinds(&issues).contains(&IssueKind::DeepNesting));
    }

    #[test]
    fn test_nesting_over_threshold() {
        let source = "\
def f(a):
    if a > 1:
        if a > 2:
            if a > 3:
                if a > 4:
                    if a > 5:
                        return a
    return 0
";
        let issues = check_with(&FunctionAuditDetector, source);
        let deep: Vec<_> = issues
            .iter()
            .filter(|i| i.kind == IssueKind::DeepNesting)
            .collect();
        assert_eq!(deep.len(), 1);
        assert_eq!(deep[0].severity, Severity::Warning);
        assert!(deep[0].message.contains("5 levels"));
        assert_eq!(deep[0].line, Some(6));
    }

    #[test]
    fn test_loops_count_toward_nesting() {
        let source = "\
def f(rows):
    for row in rows:
        for cell in row:
            while cell:
                if cell > 1:
                    with open('x') as fh:
                        fh.write(cell)
";
        let issues = check_with(&FunctionAuditDetector, source);
        assert!(kinds(&issues).contains(&IssueKind::DeepNesting));
    }

    #[test]
    fn test_per_function_issue_order() {
        // long function that also has an unused local and deep nesting:
        // order must be LongFunction, UnusedVariable, DeepNesting
        let mut source = String::from("def f(a):\n    spare = a\n");
        source.push_str(
            "    if a > 1:\n        if a > 2:\n            if a > 3:\n                if a > 4:\n                    if a > 5:\n                        return a\n",
        );
        for i in 0..44 {
            source.push_str(&format!("    a = a + {i}\n"));
        }
        source.push_str("    return a\n");
        let issues = check_with(&FunctionAuditDetector, &source);
        assert_eq!(
            kinds(&issues),
            vec![
                IssueKind::LongFunction,
                IssueKind::UnusedVariable,
                IssueKind::DeepNesting,
            ]
        );
    }

    #[test]
    fn test_outer_function_reported_before_inner() {
        let source = "\
def outer(a):
    dead_outer = a
    def inner(b):
        dead_inner = b
        return b
    return inner(a)
";
        let issues = check_with(&FunctionAuditDetector, source);
        assert_eq!(
            kinds(&issues),
            vec![IssueKind::UnusedVariable, IssueKind::UnusedVariable]
        );
        assert!(issues[0].message.contains("dead_outer"));
        assert!(issues[1].message.contains("dead_inner"));
    }

    #[test]
    fn test_method_in_class_is_audited() {
        let source = "\
class Thing:
    def work(self, a):
        wasted = a + 1
        return a
";
        let issues = check_with(&FunctionAuditDetector, source);
        assert_eq!(kinds(&issues), vec![IssueKind::UnusedVariable]);
        assert!(issues[0].message.contains("wasted"));
    }

    #[test]
    fn test_augmented_assignment_counts_as_read() {
        let source = "def f(a):\n    a += 1\n    return 0\n";
        let issues = check_with(&FunctionAuditDetector, source);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_tuple_unpacking_tracked() {
        let source = "def f(pair):\n    first, second = pair\n    return first\n";
        let issues = check_with(&FunctionAuditDetector, source);
        assert_eq!(kinds(&issues), vec![IssueKind::UnusedVariable]);
        assert!(issues[0].message.contains("second"));
    }
}
