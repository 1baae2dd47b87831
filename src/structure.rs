//! Rule structure validator
//!
//! Walks the token sequence, so keywords quoted in string literals or
//! buried in comments never confuse the checks. Each `rule` keyword opens a
//! region that runs to the next `rule` keyword (or the end of the window);
//! within a region the presence and ordering of `when`/`then`/`end` is
//! validated, along with rule-name quoting and attribute values.

use crate::config::Thresholds;
use crate::diagnostic::{Diagnostic, Severity, Span};
use crate::lexer::{is_closed_string, Token, TokenKind};

/// Pass id used for structural diagnostics
pub const PASS_ID: &str = "rule-structure";

/// How far a rule region got through the expected keyword sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleState {
    /// `rule` seen, no `when`
    SawRule,
    /// `when` seen, no `then`
    SawWhen,
    /// `then` seen, no `end`
    SawThen,
    /// All clauses present
    SawEnd,
}

/// A lexically detected `rule ... end` span, the unit of structural analysis
struct RuleRegion<'a> {
    tokens: &'a [Token],
    span: Span,
}

impl RuleRegion<'_> {
    /// First `when`, first `then`, last `end` keyword spans. The
    /// first/first/last tie-break keeps action code that mentions these
    /// words from defeating the ordering check.
    fn clause_markers(&self, text: &str) -> (Option<Span>, Option<Span>, Option<Span>) {
        let mut first_when = None;
        let mut first_then = None;
        let mut last_end = None;

        for token in &self.tokens[1..] {
            if token.kind != TokenKind::Keyword {
                continue;
            }
            match token.text(text) {
                "when" if first_when.is_none() => {
                    first_when = Some(Span::new(token.start, token.end));
                }
                "then" if first_then.is_none() => {
                    first_then = Some(Span::new(token.start, token.end));
                }
                "end" => last_end = Some(Span::new(token.start, token.end)),
                _ => {}
            }
        }

        (first_when, first_then, last_end)
    }
}

/// Validate rule structure over a lexed window.
///
/// `tokens` must cover `text`; `base_offset` maps window offsets to
/// document-absolute coordinates.
pub fn validate_structure(
    text: &str,
    tokens: &[Token],
    base_offset: usize,
    thresholds: &Thresholds,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for region in rule_regions(text, tokens) {
        validate_region(text, &region, base_offset, thresholds, &mut diagnostics);
    }

    diagnostics
}

/// Split the token stream into rule regions
fn rule_regions<'a>(text: &str, tokens: &'a [Token]) -> Vec<RuleRegion<'a>> {
    let starts: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind == TokenKind::Keyword && t.text(text) == "rule")
        .map(|(i, _)| i)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(tokens.len());
            let slice = &tokens[start..end];
            RuleRegion {
                tokens: slice,
                span: Span::new(slice[0].start, slice[slice.len() - 1].end),
            }
        })
        .collect()
}

fn validate_region(
    text: &str,
    region: &RuleRegion<'_>,
    base_offset: usize,
    thresholds: &Thresholds,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let rule_token = region.tokens[0];

    // An unterminated rule-name quote swallows the rest of the region during
    // lexing, so report it alone rather than cascading presence errors.
    if let Some(name_token) = region
        .tokens[1..]
        .iter()
        .find(|t| !t.kind.is_trivia())
    {
        if name_token.kind == TokenKind::String && !is_closed_string(name_token.text(text)) {
            diagnostics.push(Diagnostic::new(
                PASS_ID,
                Severity::Error,
                "Unclosed quote in rule name",
                Span::new(rule_token.start, name_token.end).offset(base_offset),
            ));
            return;
        }
    }

    let (first_when, first_then, last_end) = region.clause_markers(text);

    validate_attributes(text, region, first_when.or(first_then), base_offset, diagnostics);

    let state = match (first_when, first_then, last_end) {
        (None, _, _) => RuleState::SawRule,
        (Some(_), None, _) => RuleState::SawWhen,
        (Some(_), Some(_), None) => RuleState::SawThen,
        (Some(_), Some(_), Some(_)) => RuleState::SawEnd,
    };

    // Presence checks guard against partial edits with a minimum region
    // length; a missing clause short-circuits the rest of the cascade.
    let substantial = region.span.len() > thresholds.rule_region_min;
    match state {
        RuleState::SawRule => {
            if substantial {
                diagnostics.push(Diagnostic::new(
                    PASS_ID,
                    Severity::Error,
                    "Rule must contain 'when' clause",
                    region.span.offset(base_offset),
                ));
            }
            return;
        }
        RuleState::SawWhen => {
            if substantial {
                diagnostics.push(Diagnostic::new(
                    PASS_ID,
                    Severity::Error,
                    "Rule must contain 'then' clause after 'when'",
                    region.span.offset(base_offset),
                ));
            }
            return;
        }
        RuleState::SawThen => {
            if substantial {
                diagnostics.push(Diagnostic::new(
                    PASS_ID,
                    Severity::Warning,
                    "Rule should end with 'end' keyword",
                    region.span.offset(base_offset),
                ));
            }
        }
        RuleState::SawEnd => {}
    }

    // Ordering runs whenever all three clauses exist, regardless of the
    // length gate, so short but complete rules are still checked.
    if let (Some(when), Some(then), Some(end)) = (first_when, first_then, last_end) {
        if when.start > then.start {
            diagnostics.push(Diagnostic::new(
                PASS_ID,
                Severity::Error,
                "'when' clause must come before 'then' clause",
                when.offset(base_offset),
            ));
        }
        if then.start > end.start {
            diagnostics.push(Diagnostic::new(
                PASS_ID,
                Severity::Error,
                "'then' clause must come before 'end' keyword",
                then.offset(base_offset),
            ));
        }
    }
}

/// Validate attribute clauses between the rule header and the `when` clause
fn validate_attributes(
    text: &str,
    region: &RuleRegion<'_>,
    header_end: Option<Span>,
    base_offset: usize,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let limit = header_end.map(|s| s.start).unwrap_or(region.span.end);

    let mut iter = region.tokens[1..]
        .iter()
        .filter(|t| !t.kind.is_trivia() && t.start < limit)
        .peekable();

    while let Some(token) = iter.next() {
        if token.kind != TokenKind::Keyword || token.text(text) != "salience" {
            continue;
        }
        match iter.peek() {
            Some(value) if value.kind == TokenKind::Number => {}
            Some(value) => {
                diagnostics.push(Diagnostic::new(
                    PASS_ID,
                    Severity::Error,
                    "Salience value must be numeric",
                    Span::new(token.start, value.end).offset(base_offset),
                ));
            }
            None => {
                diagnostics.push(Diagnostic::new(
                    PASS_ID,
                    Severity::Error,
                    "Salience value must be numeric",
                    Span::new(token.start, token.end).offset(base_offset),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn validate(text: &str) -> Vec<Diagnostic> {
        validate_structure(text, &tokenize(text), 0, &Thresholds::default())
    }

    #[test]
    fn test_well_formed_rule_is_clean() {
        let text = "rule \"Sample\"\nwhen\n  $p : Person(age > 18)\nthen\n  insert(new Adult());\nend";
        assert!(validate(text).is_empty());
    }

    #[test]
    fn test_missing_when() {
        let text = "rule \"NoWhen\"\n  // some filler to pass the length gate\nend";
        let diags = validate(text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Rule must contain 'when' clause");
        assert!(diags[0].is_error());
    }

    #[test]
    fn test_missing_then_short_circuits() {
        let text = "rule \"NoThen\"\nwhen\n  $p : Person(age > 18)\n// no consequence yet";
        let diags = validate(text);
        // Exactly one error and no missing-end warning for the same region
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "Rule must contain 'then' clause after 'when'"
        );
        assert!(diags[0].is_error());
    }

    #[test]
    fn test_missing_end_is_warning() {
        let text = "rule \"NoEnd\"\nwhen\n  $p : Person(age > 18)\nthen\n  retract($p);";
        let diags = validate(text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Rule should end with 'end' keyword");
        assert!(diags[0].is_warning());
    }

    #[test]
    fn test_when_after_then_ordering() {
        let diags = validate("rule \"R\" then X when Y end");
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "'when' clause must come before 'then' clause"
        );
    }

    #[test]
    fn test_then_after_end_ordering() {
        let diags = validate("rule \"R\" when X end filler then Y");
        assert!(diags
            .iter()
            .any(|d| d.message == "'then' clause must come before 'end' keyword"));
    }

    #[test]
    fn test_keywords_inside_strings_ignored() {
        // "when"/"then" in a string literal must not satisfy the presence check
        let text = "rule \"Tricky\"\n  // note: \"when then end\" appears in this comment\nend";
        let diags = validate(text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Rule must contain 'when' clause");
    }

    #[test]
    fn test_tiny_partial_rule_not_flagged() {
        // Below the candidate length gate: user is still typing
        assert!(validate("rule \"X\"").is_empty());
    }

    #[test]
    fn test_unclosed_rule_name_quote() {
        let text = "rule \"Half finished name\nwhen\n  something()\nthen\nend";
        let diags = validate(text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Unclosed quote in rule name");
        assert_eq!(diags[0].span.start, 0);
    }

    #[test]
    fn test_escaped_final_quote_is_still_unclosed() {
        // The trailing \" is an escaped quote, not a terminator
        let text = "rule \"a long rule name that ends with an escape\\\"";
        let diags = validate(text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Unclosed quote in rule name");
    }

    #[test]
    fn test_salience_numeric_ok() {
        let text = "rule \"S\"\n  salience 100\nwhen\n  Person()\nthen\n  update();\nend";
        assert!(validate(text).is_empty());
    }

    #[test]
    fn test_salience_non_numeric() {
        let text = "rule \"S\"\n  salience \"high\"\nwhen\n  Person()\nthen\n  update();\nend";
        let diags = validate(text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Salience value must be numeric");
        assert!(diags[0].is_error());
    }

    #[test]
    fn test_multiple_regions() {
        let text = "rule \"A\"\nwhen\n  Person(age > 18)\nthen\n  insert(1);\nend\n\nrule \"B\"\n  // missing everything else, long enough to count\nend";
        let diags = validate(text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Rule must contain 'when' clause");
        // The second region starts after the first
        assert!(diags[0].span.start > 40);
    }
}
