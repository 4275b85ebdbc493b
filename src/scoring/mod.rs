//! Quality scoring
//!
//! Folds the issue list into a bounded 0–100 score with a fixed linear
//! penalty per severity:
//!
//! ```text
//! score = clamp(100 - 10×errors - 5×warnings - 2×infos, 0, 100)
//! ```
//!
//! A clean result scores exactly 100.

use crate::models::{Issue, Severity};

pub const BASE_SCORE: i32 = 100;
pub const ERROR_PENALTY: i32 = 10;
pub const WARNING_PENALTY: i32 = 5;
pub const INFO_PENALTY: i32 = 2;

/// Penalty applied per issue at a given severity
pub fn penalty(severity: Severity) -> i32 {
    match severity {
        Severity::Error => ERROR_PENALTY,
        Severity::Warning => WARNING_PENALTY,
        Severity::Info => INFO_PENALTY,
    }
}

/// Fold issues into a quality score in [0, 100]
pub fn quality_score(issues: &[Issue]) -> u8 {
    let total: i32 = issues.iter().map(|i| penalty(i.severity)).sum();
    (BASE_SCORE - total).clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueKind;

    fn issue(severity: Severity) -> Issue {
        Issue {
            kind: IssueKind::LongFunction,
            severity,
            message: String::new(),
            line: None,
            suggestion: None,
            target: None,
        }
    }

    #[test]
    fn test_no_issues_scores_100() {
        assert_eq!(quality_score(&[]), 100);
    }

    #[test]
    fn test_single_penalties() {
        assert_eq!(quality_score(&[issue(Severity::Error)]), 90);
        assert_eq!(quality_score(&[issue(Severity::Warning)]), 95);
        assert_eq!(quality_score(&[issue(Severity::Info)]), 98);
    }

    #[test]
    fn test_penalties_accumulate() {
        let issues = vec![
            issue(Severity::Error),
            issue(Severity::Warning),
            issue(Severity::Info),
        ];
        assert_eq!(quality_score(&issues), 83);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let issues: Vec<Issue> = (0..20).map(|_| issue(Severity::Error)).collect();
        assert_eq!(quality_score(&issues), 0);
    }
}
