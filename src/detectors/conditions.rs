//! Condition checks: literal and self-referential `if` tests

use crate::detectors::{for_each_stmt, Detector, ModuleView};
use crate::models::{Issue, IssueKind, Severity};
use rustpython_parser::ast::{CmpOp, Constant, Expr, Stmt};

/// Detects `if` statements whose condition is literally `True` or `False`
pub struct ConstantConditionDetector;

impl Detector for ConstantConditionDetector {
    fn name(&self) -> &'static str {
        "constant-condition"
    }

    fn description(&self) -> &'static str {
        "Detects if statements that are always or never taken"
    }

    fn check(&self, module: &ModuleView<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for_each_stmt(module.suite(), &mut |stmt| {
            let Stmt::If(if_stmt) = stmt else { return };
            let Expr::Constant(c) = if_stmt.test.as_ref() else {
                return;
            };
            let Constant::Bool(value) = &c.value else { return };
            let line = module.line_of(if_stmt.range.start());
            let outcome = if *value {
                "always True, so this if statement will always execute"
            } else {
                "always False, so this if statement will never execute"
            };
            issues.push(Issue {
                kind: IssueKind::ConstantCondition,
                severity: Severity::Warning,
                message: format!("Condition on line {line} is {outcome}."),
                line: Some(line),
                suggestion: Some("Remove the if statement or fix the condition.".to_string()),
                target: None,
            });
        });
        issues
    }
}

/// Detects `if` conditions comparing a variable with itself (`x == x`)
pub struct SelfComparisonDetector;

impl Detector for SelfComparisonDetector {
    fn name(&self) -> &'static str {
        "self-comparison"
    }

    fn description(&self) -> &'static str {
        "Detects comparisons of a variable with itself"
    }

    fn check(&self, module: &ModuleView<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for_each_stmt(module.suite(), &mut |stmt| {
            let Stmt::If(if_stmt) = stmt else { return };
            let Expr::Compare(cmp) = if_stmt.test.as_ref() else {
                return;
            };
            if cmp.ops.len() != 1 || cmp.comparators.len() != 1 {
                return;
            }
            let (Expr::Name(left), Expr::Name(right)) = (cmp.left.as_ref(), &cmp.comparators[0])
            else {
                return;
            };
            if left.id != right.id {
                return;
            }
            let verdict = match cmp.ops[0] {
                CmpOp::Eq => "True",
                CmpOp::NotEq => "False",
                _ => return,
            };
            let line = module.line_of(if_stmt.range.start());
            issues.push(Issue {
                kind: IssueKind::SelfComparison,
                severity: Severity::Error,
                message: format!(
                    "Comparing '{}' with itself on line {line}; this condition is always {verdict}.",
                    left.id
                ),
                line: Some(line),
                suggestion: Some(
                    "Compare with a different variable or value.".to_string(),
                ),
                target: Some(left.id.to_string()),
            });
        });
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::tests::check_with;

    #[test]
    fn test_constant_true_condition() {
        let issues = check_with(&ConstantConditionDetector, "if True:\n    print('hi')\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::ConstantCondition);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].line, Some(1));
        assert!(issues[0].message.contains("always True"));
    }

    #[test]
    fn test_constant_false_condition() {
        let issues = check_with(&ConstantConditionDetector, "if False:\n    print('hi')\n");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("never execute"));
    }

    #[test]
    fn test_variable_condition_is_clean() {
        let issues = check_with(&ConstantConditionDetector, "if x:\n    print('hi')\n");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_self_comparison_eq() {
        let issues = check_with(&SelfComparisonDetector, "if x == x:\n    pass\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::SelfComparison);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("always True"));
    }

    #[test]
    fn test_self_comparison_not_eq() {
        let issues = check_with(&SelfComparisonDetector, "if y != y:\n    pass\n");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("always False"));
    }

    #[test]
    fn test_different_names_are_clean() {
        let issues = check_with(&SelfComparisonDetector, "if x == y:\n    pass\n");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_nested_if_is_found() {
        let source = "def f(a):\n    if a:\n        if True:\n            pass\n";
        let issues = check_with(&ConstantConditionDetector, source);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, Some(3));
    }
}
