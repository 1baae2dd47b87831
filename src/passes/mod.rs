//! Heuristic lint passes
//!
//! Each pass is an independent, order-insensitive check over the analyzed
//! span. Passes share a minimum-fragment gate so single tokens and very
//! short fragments never produce noise while the user is mid-edit, and each
//! degrades to "no diagnostic" on pathological input rather than failing.

mod action_block;
mod calls;
mod eval_call;
mod field_access;
mod strings;
mod typo;

pub use action_block::{IncompleteStatementPass, StatementSemicolonPass};
pub use calls::FunctionCallPass;
pub use eval_call::EvalConstraintPass;
pub use field_access::FieldAccessPass;
pub use strings::{EscapeSequencePass, UnclosedStringPass};
pub use typo::TypoPass;

use crate::catalog::Catalog;
use crate::config::Thresholds;
use crate::diagnostic::Diagnostic;
use crate::lexer::{Token, TokenKind};

/// Everything a pass may look at: the span text, its lexed tokens, the
/// catalog, and the tunable thresholds. `base_offset` maps span offsets to
/// document-absolute coordinates.
pub struct PassContext<'a> {
    pub text: &'a str,
    pub base_offset: usize,
    pub tokens: &'a [Token],
    pub catalog: &'static Catalog,
    pub thresholds: &'a Thresholds,
}

impl PassContext<'_> {
    /// Common minimum-size gate shared by all passes
    pub fn below_min_size(&self) -> bool {
        self.text.trim().len() < self.thresholds.min_fragment_len
    }

    /// The embedded action blocks the statement checks are confined to:
    /// one span per rule region, running from the region's first `then`
    /// keyword to its last `end` keyword, as window-relative offsets.
    /// Regions split at `rule` keyword tokens; a fragment with no `rule`
    /// keyword is a single region.
    pub fn action_blocks(&self) -> Vec<(usize, usize)> {
        let starts: Vec<usize> = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TokenKind::Keyword && t.text(self.text) == "rule")
            .map(|(i, _)| i)
            .collect();

        let mut regions: Vec<&[Token]> = Vec::new();
        match starts.first() {
            None => regions.push(self.tokens),
            Some(&first) => {
                if first > 0 {
                    regions.push(&self.tokens[..first]);
                }
                for (n, &start) in starts.iter().enumerate() {
                    let end = starts.get(n + 1).copied().unwrap_or(self.tokens.len());
                    regions.push(&self.tokens[start..end]);
                }
            }
        }

        let mut blocks = Vec::new();
        for region in regions {
            let mut block_start = None;
            let mut block_end = None;
            for token in region {
                if token.kind != TokenKind::Keyword {
                    continue;
                }
                match token.text(self.text) {
                    "then" if block_start.is_none() => block_start = Some(token.end),
                    "end" => block_end = Some(token.start),
                    _ => {}
                }
            }
            if let (Some(start), Some(end)) = (block_start, block_end) {
                if start <= end {
                    blocks.push((start, end));
                }
            }
        }
        blocks
    }
}

/// A self-contained heuristic check
pub trait LintPass: Send + Sync {
    /// Stable kebab-case id, used for configuration and reporting
    fn id(&self) -> &'static str;

    /// One-line description for `--list-passes`
    fn description(&self) -> &'static str;

    /// Run the check and return its findings
    fn run(&self, ctx: &PassContext<'_>) -> Vec<Diagnostic>;
}

/// The built-in pass set, in a stable order
pub fn default_passes() -> Vec<Box<dyn LintPass>> {
    vec![
        Box::new(TypoPass),
        Box::new(EvalConstraintPass),
        Box::new(FieldAccessPass),
        Box::new(StatementSemicolonPass),
        Box::new(IncompleteStatementPass),
        Box::new(UnclosedStringPass),
        Box::new(EscapeSequencePass),
        Box::new(FunctionCallPass),
    ]
}
