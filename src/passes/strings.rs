//! String literal checks: unclosed literals and invalid escape sequences

use super::{LintPass, PassContext};
use crate::diagnostic::{Diagnostic, Severity, Span};
use crate::lexer::{is_closed_string, TokenKind};

const ESCAPES: &[char] = &['n', 't', 'b', 'r', 'f', '"', '\'', '\\', 'u'];

pub struct UnclosedStringPass;

impl LintPass for UnclosedStringPass {
    fn id(&self) -> &'static str {
        "unclosed-string"
    }

    fn description(&self) -> &'static str {
        "Long quoted runs still open at the end of the text"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Vec<Diagnostic> {
        if ctx.below_min_size() {
            return Vec::new();
        }

        // The lexer already classifies an unterminated literal as a string
        // token that consumes the rest of the window.
        let Some(token) = ctx.tokens.last() else {
            return Vec::new();
        };
        if token.kind != TokenKind::String || token.end != ctx.text.len() {
            return Vec::new();
        }
        let literal = token.text(ctx.text);
        if is_closed_string(literal) {
            return Vec::new();
        }
        if literal.len() < ctx.thresholds.unclosed_string_min {
            return Vec::new();
        }

        vec![Diagnostic::new(
            self.id(),
            Severity::Error,
            "Unclosed string literal",
            Span::new(token.start, token.end).offset(ctx.base_offset),
        )]
    }
}

pub struct EscapeSequencePass;

impl LintPass for EscapeSequencePass {
    fn id(&self) -> &'static str {
        "invalid-escape"
    }

    fn description(&self) -> &'static str {
        "Backslash escapes that are not part of the standard set"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Vec<Diagnostic> {
        if ctx.below_min_size() {
            return Vec::new();
        }

        // Without at least one closed string we might be scanning the inside
        // of a literal that is still being typed.
        let closed: Vec<_> = ctx
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::String && is_closed_string(t.text(ctx.text)))
            .collect();
        if closed.is_empty() {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for token in closed {
            let literal = token.text(ctx.text);
            let interior = &literal[1..literal.len() - 1];
            let mut chars = interior.char_indices();
            while let Some((i, c)) = chars.next() {
                if c != '\\' {
                    continue;
                }
                match chars.next() {
                    Some((_, next)) if ESCAPES.contains(&next) => {}
                    Some((_, next)) => {
                        let start = token.start + 1 + i;
                        diagnostics.push(Diagnostic::new(
                            self.id(),
                            Severity::Error,
                            &format!("Invalid escape sequence '\\{}'", next),
                            Span::new(start, start + 1 + next.len_utf8())
                                .offset(ctx.base_offset),
                        ));
                    }
                    None => {}
                }
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
    fn test_unclosed_long_string() {
        let text = "rule \"R\" when then end \"this string never closes";
        let diags = run_pass(&UnclosedStringPass, text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Unclosed string literal");
        assert_eq!(diags[0].span.end, text.len());
    }

    #[test]
    fn test_short_unclosed_string_suppressed() {
        let diags = run_pass(&UnclosedStringPass, "when Person() then \"ab");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_closed_strings_are_clean() {
        let diags = run_pass(&UnclosedStringPass, "log(\"a perfectly closed literal\");");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_invalid_escape_reported() {
        let text = "log(\"ok\"); log(\"bad \\q escape\");";
        let diags = run_pass(&EscapeSequencePass, text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Invalid escape sequence '\\q'");
    }

    #[test]
    fn test_standard_escapes_accepted() {
        let text = "log(\"tab\\there\\nnewline \\\"quoted\\\" \\u0041\");";
        assert!(run_pass(&EscapeSequencePass, text).is_empty());
    }

    #[test]
    fn test_escape_check_needs_a_closed_string() {
        // Only an open literal in the span: nothing to validate yet
        let text = "log(\"still typing \\q somethin";
        assert!(run_pass(&EscapeSequencePass, text).is_empty());
    }
}
