//! Bracket/string/comment scanner
//!
//! A single-pass stack machine over a text span that tracks nesting of
//! `()[]{}` while ignoring bracket characters inside string literals and
//! both comment forms. Unmatched closers are reported immediately;
//! unmatched openers only when enough content follows them that the user
//! is unlikely to still be typing the pair.

use crate::config::Thresholds;
use crate::diagnostic::{Diagnostic, Severity, Span};

/// Pass id used for bracket diagnostics
pub const PASS_ID: &str = "unmatched-bracket";

/// Stack entry for an open bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketFrame {
    /// One of `(`, `{`, `[`
    pub open: char,
    /// Offset of the open bracket within the scanned span
    pub position: usize,
}

fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '{' => '}',
        '[' => ']',
        _ => open,
    }
}

/// Spans too short or trivially quoted/commented are not meaningful
/// analysis units.
fn should_skip(text: &str, thresholds: &Thresholds) -> bool {
    let trimmed = text.trim();
    if trimmed.len() < thresholds.min_scan_len {
        return true;
    }
    if trimmed.starts_with("//") {
        return true;
    }
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        return true;
    }
    false
}

/// Scan a span for unmatched brackets.
///
/// `base_offset` is the document-absolute offset of `text`, so emitted
/// spans land in document coordinates.
pub fn scan_brackets(text: &str, base_offset: usize, thresholds: &Thresholds) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if should_skip(text, thresholds) {
        return diagnostics;
    }

    let mut stack: Vec<BracketFrame> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];

        if in_line_comment {
            if b == b'\n' {
                in_line_comment = false;
            }
            i += 1;
            continue;
        }

        if in_block_comment {
            if b == b'*' && bytes.get(i + 1) == Some(&b'/') {
                in_block_comment = false;
                i += 2;
                continue;
            }
            i += 1;
            continue;
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                in_line_comment = true;
                i += 2;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                in_block_comment = true;
                i += 2;
                continue;
            }
            b'(' | b'{' | b'[' => {
                stack.push(BracketFrame {
                    open: b as char,
                    position: i,
                });
            }
            b')' | b'}' | b']' => {
                let close = b as char;
                match stack.last() {
                    Some(frame) if closing_for(frame.open) == close => {
                        stack.pop();
                    }
                    _ => {
                        diagnostics.push(Diagnostic::new(
                            PASS_ID,
                            Severity::Error,
                            &format!("Unmatched closing '{}'", close),
                            Span::new(i, i + 1).offset(base_offset),
                        ));
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    // Opens still on the stack are only worth reporting when enough content
    // follows them; a bracket at the cursor is usually just being typed.
    for frame in stack {
        if text.len() - frame.position >= thresholds.bracket_trailing_min {
            diagnostics.push(Diagnostic::new(
                PASS_ID,
                Severity::Error,
                &format!("Unmatched opening '{}'", frame.open),
                Span::new(frame.position, frame.position + 1).offset(base_offset),
            ));
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<Diagnostic> {
        scan_brackets(text, 0, &Thresholds::default())
    }

    #[test]
    fn test_balanced_text_is_clean() {
        assert!(scan("when Person(age > 18, name matches \"A*\") then end").is_empty());
        assert!(scan("foo({ bar[1], baz(2) })  // ok").is_empty());
    }

    #[test]
    fn test_unmatched_open_with_trailing_content() {
        let diags = scan("\"(a, (b, c)\"x and some more text");
        // Every bracket sits inside the string literal
        assert!(diags.is_empty());

        let diags = scan("(a, (b, c) and more than fifteen chars");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Unmatched opening '('");
        assert_eq!(diags[0].span, Span::new(0, 1));
    }

    #[test]
    fn test_unmatched_open_near_end_is_suppressed() {
        // Fewer than 15 characters after the stranded open
        assert!(scan("some leading text (ab").is_empty());
    }

    #[test]
    fn test_unmatched_close_reported_immediately() {
        let diags = scan("value) and the rest of it");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Unmatched closing ')'");
        assert_eq!(diags[0].span, Span::new(5, 6));
    }

    #[test]
    fn test_mismatched_pair() {
        let diags = scan("this has (a bracket] mismatch here");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].message, "Unmatched closing ']'");
        assert_eq!(diags[1].message, "Unmatched opening '('");
    }

    #[test]
    fn test_brackets_in_strings_ignored() {
        assert!(scan("insert(\"a ( lonely bracket\");").is_empty());
        assert!(scan("check(\"escaped \\\" ( quote\");").is_empty());
    }

    #[test]
    fn test_brackets_in_comments_ignored() {
        assert!(scan("foo() // ( open in comment\nbar()").is_empty());
        assert!(scan("foo() /* { [ ( */ bar()").is_empty());
    }

    #[test]
    fn test_short_span_skipped() {
        assert!(scan("((((").is_empty());
        assert!(scan("  )  ").is_empty());
    }

    #[test]
    fn test_comment_prefixed_span_skipped() {
        assert!(scan("// only a ( comment here").is_empty());
    }

    #[test]
    fn test_base_offset_applied() {
        let diags = scan_brackets(
            "value) and the rest of it",
            100,
            &Thresholds::default(),
        );
        assert_eq!(diags[0].span, Span::new(105, 106));
    }
}
