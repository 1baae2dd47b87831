//! Discouraged `eval()` constraint check

use super::{LintPass, PassContext};
use crate::diagnostic::{Diagnostic, Severity, Span};

pub struct EvalConstraintPass;

impl LintPass for EvalConstraintPass {
    fn id(&self) -> &'static str {
        "eval-constraint"
    }

    fn description(&self) -> &'static str {
        "eval() combined with an equality test; direct field constraints are faster"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Vec<Diagnostic> {
        if ctx.below_min_size() {
            return Vec::new();
        }

        let Some(pos) = ctx.text.find("eval(") else {
            return Vec::new();
        };
        if !ctx.text.contains("==") {
            return Vec::new();
        }

        vec![Diagnostic::new(
            self.id(),
            Severity::WeakWarning,
            "Consider using direct field constraints instead of eval() for better performance",
            Span::new(pos, pos + "eval(".len()).offset(ctx.base_offset),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::run_pass;
    use super::*;
    use crate::diagnostic::Severity;

    #[test]
    fn test_eval_with_equality() {
        let diags = run_pass(
            &EvalConstraintPass,
            "when\n  eval($p.getAge() == 18)\nthen",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::WeakWarning);
        assert_eq!(diags[0].span.len(), 5);
    }

    #[test]
    fn test_eval_without_equality() {
        let diags = run_pass(&EvalConstraintPass, "when\n  eval($p.isAdult())\nthen");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_equality_without_eval() {
        let diags = run_pass(&EvalConstraintPass, "when\n  Person(age == 18)\nthen");
        assert!(diags.is_empty());
    }
}
