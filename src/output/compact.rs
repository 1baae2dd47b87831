//! Compact output formatter
//!
//! One line per diagnostic, minimal output for scripting.

use super::OutputFormatter;
use crate::diagnostic::Severity;
use crate::engine::{FileDiagnostic, LintResult};

/// Compact one-line-per-diagnostic formatter
pub struct CompactFormatter {
    /// Show severity prefix
    pub show_severity: bool,
    /// Show pass ID
    pub show_pass: bool,
}

impl CompactFormatter {
    /// Create a new compact formatter
    pub fn new() -> Self {
        Self {
            show_severity: true,
            show_pass: true,
        }
    }

    /// Hide severity prefix
    pub fn without_severity(mut self) -> Self {
        self.show_severity = false;
        self
    }

    /// Hide pass ID
    pub fn without_pass(mut self) -> Self {
        self.show_pass = false;
        self
    }
}

impl Default for CompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CompactFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        for diag in &result.diagnostics {
            output.push_str(&self.format_diagnostic(diag));
            output.push('\n');
        }

        output
    }

    fn format_diagnostic(&self, diagnostic: &FileDiagnostic) -> String {
        let mut parts = Vec::new();

        // file:line:col
        parts.push(format!(
            "{}:{}:{}",
            diagnostic.file.display(),
            diagnostic.line,
            diagnostic.column
        ));

        if self.show_severity {
            let sev = match diagnostic.diagnostic.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::WeakWarning => "weak-warning",
            };
            parts.push(sev.to_string());
        }

        if self.show_pass {
            parts.push(diagnostic.diagnostic.pass.clone());
        }

        parts.push(diagnostic.diagnostic.message.clone());

        parts.join(": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Diagnostic, Span};
    use std::path::PathBuf;

    fn sample(pass: &str, severity: Severity, message: &str, line: usize) -> FileDiagnostic {
        FileDiagnostic {
            file: PathBuf::from("test.drl"),
            line,
            column: 5,
            source_line: None,
            diagnostic: Diagnostic::new(pass, severity, message, Span::new(0, 1)),
        }
    }

    #[test]
    fn test_compact_format() {
        let formatter = CompactFormatter::new();
        let diag = sample("rule-structure", Severity::Error, "Error message", 10);
        let output = formatter.format_diagnostic(&diag);
        assert_eq!(output, "test.drl:10:5: error: rule-structure: Error message");
    }

    #[test]
    fn test_compact_minimal() {
        let formatter = CompactFormatter::new().without_severity().without_pass();
        let diag = sample("rule-structure", Severity::Error, "Error", 1);
        let output = formatter.format_diagnostic(&diag);
        assert_eq!(output, "test.drl:1:5: Error");
    }

    #[test]
    fn test_compact_result() {
        let formatter = CompactFormatter::new();
        let result = LintResult {
            diagnostics: vec![
                sample("a", Severity::Error, "E1", 1),
                sample("b", Severity::Warning, "E2", 2),
            ],
            files_processed: 1,
            ..Default::default()
        };

        let output = formatter.format(&result);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
    }
}
