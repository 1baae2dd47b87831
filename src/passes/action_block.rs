//! Embedded action-block checks
//!
//! Both passes confine themselves to the action blocks of the analyzed
//! span (per rule region, the text between the region's first `then`
//! keyword and its last `end` keyword), where the host-language action
//! statements live. They are line-shape heuristics, not a parse of the
//! embedded language.

use super::{LintPass, PassContext};
use crate::diagnostic::{Diagnostic, Severity, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// A whole line shaped like a call: `name(...)` or `obj.method(...)`
static CALL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][\w.$]*\s*\(.*\)$")
        .unwrap_or_else(|e| panic!("invalid call-line pattern: {e}"))
});

/// Control-flow header: `if/for/while (...)`
static CONTROL_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(if|for|while)\s*\([^)]*\)")
        .unwrap_or_else(|e| panic!("invalid control-header pattern: {e}"))
});

/// A line whose first word is a control keyword. Requires a word boundary,
/// so `format(...)` or `iffyCheck(...)` are not exempted.
fn begins_with_control_keyword(line: &str) -> bool {
    ["if", "for", "while"].iter().any(|kw| {
        line.strip_prefix(kw).is_some_and(|rest| {
            !rest
                .bytes()
                .next()
                .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        })
    })
}

pub struct StatementSemicolonPass;

impl LintPass for StatementSemicolonPass {
    fn id(&self) -> &'static str {
        "statement-semicolon"
    }

    fn description(&self) -> &'static str {
        "Call-shaped action statements that are not terminated with ';'"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Vec<Diagnostic> {
        if ctx.below_min_size() {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for (block_start, block_end) in ctx.action_blocks() {
            let block = &ctx.text[block_start..block_end];
            let mut offset = 0;

            for line in block.split_inclusive('\n') {
                let line_start = offset;
                offset += line.len();

                let trimmed = line.trim();
                if trimmed.is_empty()
                    || trimmed.starts_with("//")
                    || trimmed.starts_with("/*")
                    || trimmed.ends_with(';')
                {
                    continue;
                }
                if begins_with_control_keyword(trimmed) {
                    continue;
                }
                if !CALL_LINE.is_match(trimmed) {
                    continue;
                }

                let leading = line.len() - line.trim_start().len();
                let start = block_start + line_start + leading;
                diagnostics.push(Diagnostic::new(
                    self.id(),
                    Severity::Warning,
                    "Statement should be terminated with ';'",
                    Span::new(start, start + trimmed.len()).offset(ctx.base_offset),
                ));
            }
        }

        diagnostics
    }
}

pub struct IncompleteStatementPass;

impl LintPass for IncompleteStatementPass {
    fn id(&self) -> &'static str {
        "incomplete-statement"
    }

    fn description(&self) -> &'static str {
        "if/for/while headers with no brace or terminator in sight"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Vec<Diagnostic> {
        if ctx.below_min_size() {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for (block_start, block_end) in ctx.action_blocks() {
            let block = &ctx.text[block_start..block_end];

            for caps in CONTROL_HEADER.captures_iter(block) {
                // Full match and keyword group are always present on a hit
                let Some(m) = caps.get(0) else { continue };
                let keyword = caps.get(1).map(|g| g.as_str()).unwrap_or("statement");

                let tail = &block[m.end()..];
                let window_end = tail
                    .char_indices()
                    .nth(ctx.thresholds.statement_lookahead)
                    .map(|(i, _)| i)
                    .unwrap_or(tail.len());
                let window = &tail[..window_end];

                let next = window.trim_start().chars().next();
                if next == Some('{') || window.contains(';') {
                    continue;
                }

                diagnostics.push(Diagnostic::new(
                    self.id(),
                    Severity::Warning,
                    &format!("Incomplete '{}' statement", keyword),
                    Span::new(block_start + m.start(), block_start + m.end())
                        .offset(ctx.base_offset),
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

    const RULE_HEAD: &str = "rule \"R\"\nwhen\n  Person()\nthen\n";

    #[test]
    fn test_unterminated_call_line() {
        let text = format!("{}  insert($p)\nend", RULE_HEAD);
        let diags = run_pass(&StatementSemicolonPass, &text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Statement should be terminated with ';'");
        assert_eq!(&text[diags[0].span.start..diags[0].span.end], "insert($p)");
    }

    #[test]
    fn test_terminated_call_line_is_clean() {
        let text = format!("{}  insert($p);\n  System.out.println(\"hi\");\nend", RULE_HEAD);
        assert!(run_pass(&StatementSemicolonPass, &text).is_empty());
    }

    #[test]
    fn test_only_checks_between_then_and_end() {
        // Call-shaped text in the condition part is not a statement
        let text = "rule \"R\"\nwhen\n  Person(age > 18)\nthen\n  done();\nend";
        assert!(run_pass(&StatementSemicolonPass, text).is_empty());
    }

    #[test]
    fn test_second_rule_condition_is_not_a_statement() {
        // The block ends at each rule's own 'end'; the next rule's 'when'
        // section must not be scanned as action code
        let text = "rule \"A\"\nwhen\n  Person(age > 18)\nthen\n  insert($p);\nend\n\n\
                    rule \"B\"\nwhen\n  Cheese(type == \"brie\")\nthen\n  eat();\nend";
        assert!(run_pass(&StatementSemicolonPass, text).is_empty());
    }

    #[test]
    fn test_unterminated_statement_in_second_rule() {
        let text = "rule \"A\"\nwhen\n  Person()\nthen\n  insert($p);\nend\n\n\
                    rule \"B\"\nwhen\n  Cheese()\nthen\n  eat($c)\nend";
        let diags = run_pass(&StatementSemicolonPass, text);
        assert_eq!(diags.len(), 1);
        assert_eq!(&text[diags[0].span.start..diags[0].span.end], "eat($c)");
    }

    #[test]
    fn test_call_starting_like_control_keyword_still_checked() {
        // 'format' and 'iffyCheck' begin with control keywords but are calls
        let text = format!("{}  format(\"x\", 1)\n  iffyCheck()\nend", RULE_HEAD);
        let diags = run_pass(&StatementSemicolonPass, &text);
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn test_comment_lines_skipped() {
        let text = format!("{}  // insert($p)\n  update($p);\nend", RULE_HEAD);
        assert!(run_pass(&StatementSemicolonPass, &text).is_empty());
    }

    #[test]
    fn test_incomplete_if_statement() {
        let text = format!("{}  if ($p.isAdult())\nend", RULE_HEAD);
        let diags = run_pass(&IncompleteStatementPass, &text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Incomplete 'if' statement");
    }

    #[test]
    fn test_braced_if_is_clean() {
        let text = format!("{}  if ($p.isAdult()) {{\n    update($p);\n  }}\nend", RULE_HEAD);
        assert!(run_pass(&IncompleteStatementPass, &text).is_empty());
    }

    #[test]
    fn test_single_statement_if_with_terminator_is_clean() {
        let text = format!("{}  if ($ok) retract($p);\nend", RULE_HEAD);
        assert!(run_pass(&IncompleteStatementPass, &text).is_empty());
    }

    #[test]
    fn test_while_without_body() {
        let text = format!("{}  while (hasMore())\nend", RULE_HEAD);
        let diags = run_pass(&IncompleteStatementPass, &text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Incomplete 'while' statement");
    }
}
