//! Prompt construction for code correction

use crate::ai::FixRequest;

/// System prompt for the correction call
pub const SYSTEM_PROMPT: &str = "You are an expert Python developer helping a learner improve \
their code. Respond ONLY with a JSON object of the shape \
{\"fixed_code\": \"...\", \"explanation\": \"...\"}. The fixed_code value must be a complete, \
runnable corrected version of the submitted program; the explanation must describe, in plain \
language, what was wrong and what you changed. Do not add commentary outside the JSON object.";

/// Build the user prompt for one fix request
pub fn fix_prompt(request: &FixRequest) -> String {
    let mut prompt = String::new();

    if let Some(problem) = &request.problem {
        if !problem.trim().is_empty() {
            prompt.push_str("The code is meant to solve this problem:\n");
            prompt.push_str(problem);
            prompt.push_str("\n\n");
        }
    }

    prompt.push_str("Here is the submitted Python code:\n\n```python\n");
    prompt.push_str(&request.code);
    if !request.code.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str("```\n");

    if !request.issue_summaries.is_empty() {
        prompt.push_str("\nStatic analysis flagged these issues:\n");
        for summary in &request.issue_summaries {
            prompt.push_str("- ");
            prompt.push_str(summary);
            prompt.push('\n');
        }
    }

    prompt.push_str(
        "\nProduce the corrected code and an explanation as the JSON object described in the \
         system prompt.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_code_and_issues() {
        let request = FixRequest {
            code: "x = 1".to_string(),
            problem: Some("print a number".to_string()),
            issue_summaries: vec!["Variable 'x' is never used".to_string()],
        };
        let prompt = fix_prompt(&request);
        assert!(prompt.contains("```python\nx = 1\n```"));
        assert!(prompt.contains("print a number"));
        assert!(prompt.contains("never used"));
    }

    #[test]
    fn test_prompt_without_problem_or_issues() {
        let request = FixRequest {
            code: "print('hi')\n".to_string(),
            problem: None,
            issue_summaries: vec![],
        };
        let prompt = fix_prompt(&request);
        assert!(!prompt.contains("meant to solve"));
        assert!(!prompt.contains("Static analysis flagged"));
    }
}
