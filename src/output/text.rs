//! Human-readable text output formatter

use super::OutputFormatter;
use crate::diagnostic::Severity;
use crate::engine::{FileDiagnostic, LintResult};
use colored::*;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show source context
    pub show_source: bool,

    /// Show help text
    pub show_help: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_source: true,
            show_help: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = format!("{}", severity);
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
            Severity::WeakWarning => s.blue(),
        }
    }

    fn format_location(&self, diag: &FileDiagnostic) -> String {
        format!("{}:{}:{}", diag.file.display(), diag.line, diag.column)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        // Group diagnostics by file, keeping first-seen file order
        let mut order: Vec<&std::path::PathBuf> = Vec::new();
        let mut by_file: std::collections::HashMap<_, Vec<_>> = std::collections::HashMap::new();
        for diag in &result.diagnostics {
            let entry = by_file.entry(&diag.file).or_insert_with(Vec::new);
            if entry.is_empty() {
                order.push(&diag.file);
            }
            entry.push(diag);
        }

        for file in order {
            if self.colored {
                output.push_str(&format!("{}\n", file.display().to_string().underline()));
            } else {
                output.push_str(&format!("{}\n", file.display()));
            }

            for diag in &by_file[file] {
                output.push_str(&self.format_diagnostic(diag));
                output.push('\n');
            }
            output.push('\n');
        }

        // Statistics
        if self.show_stats {
            output.push_str(&format!(
                "\n{} {} processed",
                result.files_processed,
                if result.files_processed == 1 {
                    "file"
                } else {
                    "files"
                }
            ));

            let mut counts = Vec::new();
            if result.error_count > 0 {
                let s = format!(
                    "{} {}",
                    result.error_count,
                    if result.error_count == 1 {
                        "error"
                    } else {
                        "errors"
                    }
                );
                counts.push(if self.colored {
                    s.red().to_string()
                } else {
                    s
                });
            }
            if result.warning_count > 0 {
                let s = format!(
                    "{} {}",
                    result.warning_count,
                    if result.warning_count == 1 {
                        "warning"
                    } else {
                        "warnings"
                    }
                );
                counts.push(if self.colored {
                    s.yellow().to_string()
                } else {
                    s
                });
            }
            if result.weak_warning_count > 0 {
                let s = format!(
                    "{} {}",
                    result.weak_warning_count,
                    if result.weak_warning_count == 1 {
                        "weak warning"
                    } else {
                        "weak warnings"
                    }
                );
                counts.push(if self.colored {
                    s.blue().to_string()
                } else {
                    s
                });
            }

            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');

            output.push_str(&format!(
                "Finished in {:.2}s\n",
                result.duration.as_secs_f64()
            ));
        }

        output
    }

    fn format_diagnostic(&self, diag: &FileDiagnostic) -> String {
        let mut output = String::new();

        // Main diagnostic line
        output.push_str(&format!(
            "{}: {}[{}]: {}\n",
            self.format_location(diag),
            self.severity_str(diag.diagnostic.severity),
            if self.colored {
                diag.diagnostic.pass.cyan().to_string()
            } else {
                diag.diagnostic.pass.clone()
            },
            diag.diagnostic.message
        ));

        // Source line with a caret underline
        if self.show_source {
            if let Some(source) = &diag.source_line {
                let pipe = if self.colored {
                    "|".blue().to_string()
                } else {
                    "|".to_string()
                };
                output.push_str(&format!("   {}\n", pipe));

                let line_num = format!("{:>4}", diag.line);
                output.push_str(&format!(
                    "{} {} {}\n",
                    if self.colored {
                        line_num.blue().to_string()
                    } else {
                        line_num
                    },
                    pipe,
                    source
                ));

                if diag.column > 0 {
                    let padding = " ".repeat(diag.column - 1);
                    let width = diag.diagnostic.span.len().max(1).min(
                        source.chars().count().saturating_sub(diag.column - 1).max(1),
                    );
                    let underline = "^".repeat(width);
                    output.push_str(&format!(
                        "   {} {}{}\n",
                        pipe,
                        padding,
                        if self.colored {
                            underline.red().to_string()
                        } else {
                            underline
                        }
                    ));
                }
            }
        }

        // Help text
        if self.show_help {
            if let Some(help) = &diag.diagnostic.help {
                output.push_str(&format!(
                    "   {} help: {}\n",
                    if self.colored {
                        "=".blue().to_string()
                    } else {
                        "=".to_string()
                    },
                    help
                ));
            }
        }

        output
    }
}
