//! Function-call completeness check

use super::{LintPass, PassContext};
use crate::diagnostic::{Diagnostic, Severity, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// Start of a call: `name(`
static CALL_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\(")
        .unwrap_or_else(|e| panic!("invalid call-start pattern: {e}"))
});

const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch"];

pub struct FunctionCallPass;

impl LintPass for FunctionCallPass {
    fn id(&self) -> &'static str {
        "unclosed-call"
    }

    fn description(&self) -> &'static str {
        "Call arguments with no closing parenthesis on their line"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Vec<Diagnostic> {
        if ctx.below_min_size() {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        let mut offset = 0;

        for line in ctx.text.split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();

            let stripped = line.strip_suffix('\n').unwrap_or(line);
            if stripped.trim_start().starts_with("//") {
                continue;
            }

            for caps in CALL_START.captures_iter(stripped) {
                let (Some(m), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if CONTROL_KEYWORDS.contains(&name.as_str()) {
                    continue;
                }

                // Walk the rest of the line balancing parentheses
                let tail = &stripped[m.end()..];
                let mut depth = 1usize;
                let mut closed = false;
                for c in tail.chars() {
                    match c {
                        '(' => depth += 1,
                        ')' => {
                            depth -= 1;
                            if depth == 0 {
                                closed = true;
                                break;
                            }
                        }
                        _ => {}
                    }
                }
                if closed {
                    continue;
                }

                let fragment = &stripped[m.start()..];
                if fragment.len() <= ctx.thresholds.call_fragment_min {
                    continue;
                }

                // An open paren right at the end of the text is a call the
                // user is still typing, not a mistake worth reporting.
                let open_abs = line_start + m.end() - 1;
                if line_start + stripped.len() == ctx.text.len()
                    && ctx.text[open_abs + 1..].trim().is_empty()
                {
                    continue;
                }

                diagnostics.push(Diagnostic::new(
                    self.id(),
                    Severity::Error,
                    &format!("Missing closing parenthesis in function call '{}'", name.as_str()),
                    Span::new(line_start + m.start(), line_start + stripped.len())
                        .offset(ctx.base_offset),
                ));
                // One report per line is enough
                break;
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
    fn test_unclosed_call_reported() {
        let text = "then\n  insert($person, $account\n  update($x);\nend";
        let diags = run_pass(&FunctionCallPass, text);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("insert"));
        assert!(diags[0].is_error());
    }

    #[test]
    fn test_closed_calls_are_clean() {
        let text = "then\n  insert(new Adult($p));\n  log(format(\"x\", 1));\nend";
        assert!(run_pass(&FunctionCallPass, text).is_empty());
    }

    #[test]
    fn test_nested_parens_balance() {
        let text = "when\n  eval(max(a, min(b, c)) > 0)\nthen done();";
        assert!(run_pass(&FunctionCallPass, text).is_empty());
    }

    #[test]
    fn test_just_opened_call_at_end_of_text_ignored() {
        // The cursor is right after the paren; not worth flagging yet
        let text = "then\n  insertLogical(";
        assert!(run_pass(&FunctionCallPass, text).is_empty());
    }

    #[test]
    fn test_short_fragment_ignored() {
        let text = "when Person() then\n  f(x\nend";
        assert!(run_pass(&FunctionCallPass, text).is_empty());
    }

    #[test]
    fn test_control_flow_headers_excluded() {
        let text = "then\n  if (a > b &&\n      c < d) { doIt(); }\nend";
        assert!(run_pass(&FunctionCallPass, text).is_empty());
    }
}
