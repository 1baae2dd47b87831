//! Multi-file lint orchestration
//!
//! Wraps the core [`Analyzer`](crate::analyzer::Analyzer) with file
//! reading, optional parallelism, line/column mapping, and result
//! accounting for the CLI.

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, Severity, Span};
use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// A core diagnostic resolved to a file position for presentation
#[derive(Debug, Clone, Serialize)]
pub struct FileDiagnostic {
    /// File the diagnostic belongs to
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// The source line, for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
    /// The underlying diagnostic
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

/// Result of a lint run
#[derive(Debug, Default)]
pub struct LintResult {
    /// All diagnostics, in file order then position order
    pub diagnostics: Vec<FileDiagnostic>,

    /// Files processed
    pub files_processed: usize,

    /// Files with at least one error
    pub files_with_errors: usize,

    /// Files with at least one warning
    pub files_with_warnings: usize,

    /// Total errors
    pub error_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Total weak warnings
    pub weak_warning_count: usize,

    /// Processing duration
    pub duration: Duration,
}

impl LintResult {
    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if result is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }

    /// Get exit code (0 = success, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: LintResult) {
        self.diagnostics.extend(other.diagnostics);
        self.files_processed += other.files_processed;
        self.files_with_errors += other.files_with_errors;
        self.files_with_warnings += other.files_with_warnings;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.weak_warning_count += other.weak_warning_count;
    }
}

/// Map a byte offset to 1-based line and column numbers
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = &text[..offset];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// The file-level linter
pub struct Engine {
    config: Config,
    analyzer: Analyzer,
}

impl Engine {
    /// Create a new engine with configuration
    pub fn new(config: Config) -> Self {
        let analyzer = Analyzer::new(config.clone());
        Self { config, analyzer }
    }

    /// The underlying analyzer
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Lint multiple files
    pub fn lint(&self, files: &[PathBuf]) -> LintResult {
        let start = Instant::now();

        let results: Vec<LintResult> = if self.config.engine.parallel && files.len() > 1 {
            let threads = if self.config.engine.jobs > 0 {
                self.config.engine.jobs
            } else {
                num_cpus::get()
            };
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build();
            match pool {
                Ok(pool) => {
                    pool.install(|| files.par_iter().map(|f| self.lint_file(f)).collect())
                }
                Err(_) => files.iter().map(|f| self.lint_file(f)).collect(),
            }
        } else {
            files.iter().map(|f| self.lint_file(f)).collect()
        };

        let mut combined = LintResult::default();
        for result in results {
            combined.merge(result);
        }

        combined.duration = start.elapsed();
        combined
    }

    /// Lint a single file
    pub fn lint_file(&self, path: &Path) -> LintResult {
        debug!("linting {}", path.display());
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                let diag = Diagnostic::new(
                    "file-read-error",
                    Severity::Error,
                    &format!("Failed to read file: {}", e),
                    Span::new(0, 0),
                );
                return LintResult {
                    diagnostics: vec![FileDiagnostic {
                        file: path.to_path_buf(),
                        line: 1,
                        column: 1,
                        source_line: None,
                        diagnostic: diag,
                    }],
                    files_processed: 1,
                    files_with_errors: 1,
                    error_count: 1,
                    ..LintResult::default()
                };
            }
        };

        self.lint_source(path, &content)
    }

    /// Lint in-memory source on behalf of a file path
    pub fn lint_source(&self, path: &Path, content: &str) -> LintResult {
        let mut result = LintResult {
            files_processed: 1,
            ..LintResult::default()
        };

        let source_lines: Vec<&str> = content.lines().collect();

        for diagnostic in self.analyzer.analyze(content) {
            match diagnostic.severity {
                Severity::Error => result.error_count += 1,
                Severity::Warning => result.warning_count += 1,
                Severity::WeakWarning => result.weak_warning_count += 1,
            }

            let (line, column) = line_col(content, diagnostic.span.start);
            let source_line = source_lines.get(line - 1).map(|s| s.to_string());

            result.diagnostics.push(FileDiagnostic {
                file: path.to_path_buf(),
                line,
                column,
                source_line,
                diagnostic,
            });
        }

        if result.error_count > 0 {
            result.files_with_errors = 1;
        }
        if result.warning_count > 0 {
            result.files_with_warnings = 1;
        }

        result
    }
}
