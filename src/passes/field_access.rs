//! Deep field-access chain check

use super::{LintPass, PassContext};
use crate::diagnostic::{Diagnostic, Severity, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// `$var.a.b` and deeper: a bound variable followed by two or more
/// member accesses
static CHAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*){2,}")
        .unwrap_or_else(|e| panic!("invalid field-chain pattern: {e}"))
});

pub struct FieldAccessPass;

impl LintPass for FieldAccessPass {
    fn id(&self) -> &'static str {
        "deep-field-access"
    }

    fn description(&self) -> &'static str {
        "Chained member access on a bound variable; prefer getter methods"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Vec<Diagnostic> {
        if ctx.below_min_size() {
            return Vec::new();
        }

        CHAIN
            .find_iter(ctx.text)
            .map(|m| {
                Diagnostic::new(
                    self.id(),
                    Severity::Warning,
                    &format!(
                        "Deep field access '{}'; consider using getter methods instead",
                        m.as_str()
                    ),
                    Span::new(m.start(), m.end()).offset(ctx.base_offset),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::run_pass;
    use super::*;

    #[test]
    fn test_deep_chain_reported() {
        let diags = run_pass(&FieldAccessPass, "when\n  $p.address.city == \"Oslo\"\nthen");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("$p.address.city"));
        assert!(diags[0].is_warning());
    }

    #[test]
    fn test_single_access_is_fine() {
        let diags = run_pass(&FieldAccessPass, "when\n  $p.age > 18 && $p.name != null\nthen");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_plain_identifiers_not_matched() {
        // No $ binding, no report, however deep the chain
        let diags = run_pass(&FieldAccessPass, "then\n  System.out.println(\"hi\");\nend");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_multiple_chains() {
        let diags = run_pass(
            &FieldAccessPass,
            "when\n  $a.b.c == $x.y.z.w\nthen do();",
        );
        assert_eq!(diags.len(), 2);
    }
}
