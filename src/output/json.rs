//! JSON output formatter

use super::OutputFormatter;
use crate::diagnostic::Severity;
use crate::engine::{FileDiagnostic, LintResult};
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

fn severity_str(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::WeakWarning => "weak-warning",
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<JsonDiagnostic<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    pass: &'a str,
    severity: &'static str,
    message: &'a str,
    file: String,
    line: usize,
    column: usize,
    start: usize,
    end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_line: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonSummary {
    files_processed: usize,
    files_with_errors: usize,
    files_with_warnings: usize,
    error_count: usize,
    warning_count: usize,
    weak_warning_count: usize,
    duration_ms: u128,
}

fn to_json_diagnostic(diag: &FileDiagnostic) -> JsonDiagnostic<'_> {
    JsonDiagnostic {
        pass: &diag.diagnostic.pass,
        severity: severity_str(diag.diagnostic.severity),
        message: &diag.diagnostic.message,
        file: diag.file.display().to_string(),
        line: diag.line,
        column: diag.column,
        start: diag.diagnostic.span.start,
        end: diag.diagnostic.span.end,
        source_line: diag.source_line.as_deref(),
        help: diag.diagnostic.help.as_deref(),
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &LintResult) -> String {
        let output = JsonOutput {
            diagnostics: result.diagnostics.iter().map(to_json_diagnostic).collect(),
            summary: JsonSummary {
                files_processed: result.files_processed,
                files_with_errors: result.files_with_errors,
                files_with_warnings: result.files_with_warnings,
                error_count: result.error_count,
                warning_count: result.warning_count,
                weak_warning_count: result.weak_warning_count,
                duration_ms: result.duration.as_millis(),
            },
        };

        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_default()
        } else {
            serde_json::to_string(&output).unwrap_or_default()
        }
    }

    fn format_diagnostic(&self, diagnostic: &FileDiagnostic) -> String {
        let json_diag = to_json_diagnostic(diagnostic);
        if self.pretty {
            serde_json::to_string_pretty(&json_diag).unwrap_or_default()
        } else {
            serde_json::to_string(&json_diag).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Diagnostic, Span};
    use std::path::PathBuf;

    fn sample() -> FileDiagnostic {
        FileDiagnostic {
            file: PathBuf::from("test.drl"),
            line: 10,
            column: 5,
            source_line: None,
            diagnostic: Diagnostic::new(
                "unmatched-bracket",
                Severity::Error,
                "Unmatched closing ')'",
                Span::new(42, 43),
            ),
        }
    }

    #[test]
    fn test_json_format_diagnostic() {
        let formatter = JsonFormatter::new();
        let output = formatter.format_diagnostic(&sample());
        assert!(output.contains("\"pass\":\"unmatched-bracket\""));
        assert!(output.contains("\"severity\":\"error\""));
        assert!(output.contains("\"line\":10"));
        assert!(output.contains("\"start\":42"));
    }

    #[test]
    fn test_json_format_result() {
        let formatter = JsonFormatter::new();
        let result = LintResult {
            diagnostics: vec![],
            files_processed: 5,
            error_count: 2,
            warning_count: 3,
            ..Default::default()
        };

        let output = formatter.format(&result);
        assert!(output.contains("\"files_processed\":5"));
        assert!(output.contains("\"error_count\":2"));
        assert!(output.contains("\"warning_count\":3"));
    }

    #[test]
    fn test_json_pretty() {
        let formatter = JsonFormatter::new().pretty();
        let output = formatter.format_diagnostic(&sample());
        assert!(output.contains('\n'));
    }
}
