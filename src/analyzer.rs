//! Diagnostic aggregator: the core analysis entry point
//!
//! Runs the bracket scanner, the rule structure validator, and the lint
//! passes over an immutable text snapshot and returns one ordered
//! diagnostic list. Each stage's output is independently valid, so a caller
//! that supersedes an in-flight analysis between stages loses nothing but
//! the later stages. The analyzer holds no mutable state; a single instance
//! can serve overlapping analyses on different snapshots.

use crate::brackets::scan_brackets;
use crate::catalog::catalog;
use crate::config::Config;
use crate::diagnostic::{sort_diagnostics, Diagnostic};
use crate::lexer::Lexer;
use crate::passes::{default_passes, LintPass, PassContext};
use crate::structure::validate_structure;
use log::debug;
use std::ops::Range;

/// Stateless analysis front end over a configuration
pub struct Analyzer {
    config: Config,
    passes: Vec<Box<dyn LintPass>>,
}

impl Analyzer {
    /// Create an analyzer with the default pass set
    pub fn new(config: Config) -> Self {
        Self {
            config,
            passes: default_passes(),
        }
    }

    /// The analyzer's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The registered lint passes
    pub fn passes(&self) -> &[Box<dyn LintPass>] {
        &self.passes
    }

    /// Analyze a whole text snapshot
    pub fn analyze(&self, text: &str) -> Vec<Diagnostic> {
        self.analyze_range(text, 0..text.len(), 0)
    }

    /// Analyze the `range` window of a snapshot. `base_offset` is the
    /// document-absolute offset of `range.start`, so diagnostics come back
    /// in document coordinates even when only a fragment is analyzed.
    pub fn analyze_range(
        &self,
        text: &str,
        range: Range<usize>,
        base_offset: usize,
    ) -> Vec<Diagnostic> {
        let window = &text[range];
        let tokens: Vec<_> = Lexer::new(window).into_iter().collect();
        let thresholds = &self.config.thresholds;

        let mut diagnostics = Vec::new();

        if self.config.is_pass_enabled(crate::brackets::PASS_ID) {
            diagnostics.extend(scan_brackets(window, base_offset, thresholds));
        }

        if self.config.is_pass_enabled(crate::structure::PASS_ID) {
            diagnostics.extend(validate_structure(window, &tokens, base_offset, thresholds));
        }

        let ctx = PassContext {
            text: window,
            base_offset,
            tokens: &tokens,
            catalog: catalog(),
            thresholds,
        };
        for pass in &self.passes {
            if !self.config.is_pass_enabled(pass.id()) {
                continue;
            }
            let found = pass.run(&ctx);
            if !found.is_empty() {
                debug!("pass {} reported {} finding(s)", pass.id(), found.len());
            }
            diagnostics.extend(found);
        }

        // Severity overrides and the reporting floor apply across all stages
        for diag in &mut diagnostics {
            if let Some(severity) = self.config.severity_override(&diag.pass) {
                diag.severity = severity;
            }
        }
        diagnostics.retain(|d| self.config.meets_min_severity(d.severity));

        sort_diagnostics(&mut diagnostics);
        diagnostics
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;

    #[test]
    fn test_well_formed_rule_has_no_diagnostics() {
        let analyzer = Analyzer::default();
        let text = "rule \"Sample\"\nwhen\n  $p : Person(age > 18)\nthen\n  System.out.println(\"hi\");\nend";
        assert!(analyzer.analyze(text).is_empty());
    }

    #[test]
    fn test_diagnostics_sorted_by_position_then_severity() {
        let analyzer = Analyzer::default();
        // Misordered rule plus an eval() hint later in the text
        let text = "rule \"R\" then eval(x == 1) when Y end";
        let diags = analyzer.analyze(text);
        assert!(diags.len() >= 2);
        for pair in diags.windows(2) {
            assert!(
                pair[0].span.start < pair[1].span.start
                    || (pair[0].span.start == pair[1].span.start
                        && pair[0].severity >= pair[1].severity)
            );
        }
    }

    #[test]
    fn test_range_analysis_reports_absolute_offsets() {
        let analyzer = Analyzer::default();
        let doc = "prefix prefix rule \"R\"\nwen\n  Person(age > 18)\nthen\n  done();\nend";
        let fragment = 14..doc.len();
        let diags = analyzer.analyze_range(doc, fragment, 14);
        let typo = diags
            .iter()
            .find(|d| d.pass == "unknown-keyword")
            .expect("typo diagnostic");
        assert_eq!(&doc[typo.span.start..typo.span.end], "wen");
    }

    #[test]
    fn test_disabled_pass_is_skipped() {
        let mut config = Config::default();
        config.passes.disabled.push("eval-constraint".to_string());
        let analyzer = Analyzer::new(config);
        let text = "rule \"R\"\nwhen\n  eval(a == b)\nthen\n  done();\nend";
        assert!(analyzer.analyze(text).is_empty());
    }

    #[test]
    fn test_severity_override_applied() {
        let mut config = Config::default();
        config
            .passes
            .severity
            .insert("eval-constraint".to_string(), Severity::Error);
        let analyzer = Analyzer::new(config);
        let text = "rule \"R\"\nwhen\n  eval(a == b)\nthen\n  done();\nend";
        let diags = analyzer.analyze(text);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
    }

    #[test]
    fn test_min_severity_floor() {
        let mut config = Config::default();
        config.passes.min_severity = Some(Severity::Warning);
        let analyzer = Analyzer::new(config);
        let text = "rule \"R\"\nwhen\n  eval(a == b)\nthen\n  done();\nend";
        // The weak warning falls below the floor
        assert!(analyzer.analyze(text).is_empty());
    }

    #[test]
    fn test_pathological_inputs_do_not_panic() {
        let analyzer = Analyzer::default();
        for text in ["", "\"", "/*", "rule", "\u{0}\u{1}\u{2}", "}}}}(((("] {
            let _ = analyzer.analyze(text);
        }
    }
}
