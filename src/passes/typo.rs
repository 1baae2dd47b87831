//! Typo detector for core keywords
//!
//! Only exact hits in the static typo table are reported; real words that
//! merely resemble a keyword are left alone. Token-driven, so misspellings
//! inside strings and comments are never flagged.

use super::{LintPass, PassContext};
use crate::diagnostic::{Diagnostic, Severity, Span};
use crate::lexer::TokenKind;

pub struct TypoPass;

impl LintPass for TypoPass {
    fn id(&self) -> &'static str {
        "unknown-keyword"
    }

    fn description(&self) -> &'static str {
        "Known misspellings of rule/when/then/end with the intended keyword"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Vec<Diagnostic> {
        if ctx.below_min_size() {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for token in ctx.tokens {
            if token.kind != TokenKind::Identifier {
                continue;
            }
            let word = token.text(ctx.text);
            if let Some(suggestion) = ctx.catalog.typo_suggestion(word) {
                diagnostics.push(Diagnostic::new(
                    self.id(),
                    Severity::Error,
                    &format!("Unknown keyword '{}'. Did you mean '{}'?", word, suggestion),
                    Span::new(token.start, token.end).offset(ctx.base_offset),
                ));
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::run_pass;
    use super::*;

    #[test]
    fn test_known_typo_reported() {
        let diags = run_pass(&TypoPass, "rule \"R\"\nwen\n  Person()\nthen\nend");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Unknown keyword 'wen'. Did you mean 'when'?");
        assert!(diags[0].is_error());
    }

    #[test]
    fn test_real_word_not_reported() {
        // "went" is a real word, not in the typo table
        let diags = run_pass(&TypoPass, "rule \"R\"\nwhen went\n  Person()\nthen\nend");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_typo_inside_string_ignored() {
        let diags = run_pass(&TypoPass, "rule \"contains wen inside\"\nwhen\nthen\nend");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_typo_inside_comment_ignored() {
        let diags = run_pass(&TypoPass, "// wen thn edn ruel\nrule \"R\" when then end");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_multiple_typos() {
        let diags = run_pass(&TypoPass, "ruel \"R\"\nwen\n  Person()\nthn\nedn");
        assert_eq!(diags.len(), 4);
    }
}
