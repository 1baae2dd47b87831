//! drlint - Drools Rule File Linter
//!
//! A fast, heuristic analyzer for Drools rule language (.drl) files. It
//! combines a lossless tokenizer with a set of validation and lint passes
//! that catch common authoring mistakes without a full grammar.
//!
//! # Architecture
//!
//! ```text
//! CLI/API -> Engine -> Analyzer -> [brackets, structure, passes] -> Diagnostics
//! ```
//!
//! The engine reads files (optionally in parallel) and maps diagnostics to
//! line/column positions; the analyzer tokenizes a text snapshot and runs
//! the bracket scanner, the rule structure validator, and the registered
//! lint passes over it. Every stage works on byte offsets into the original
//! text, so analysis of an embedded fragment can report document-absolute
//! positions via [`Analyzer::analyze_range`](analyzer::Analyzer::analyze_range).
//!
//! # Example
//!
//! ```
//! use drlint::analyzer::Analyzer;
//!
//! let analyzer = Analyzer::default();
//! let diagnostics = analyzer.analyze("rule \"R\"\nwen\n  Person()\nthen\n  done();\nend");
//! assert!(diagnostics.iter().any(|d| d.message.contains("Did you mean 'when'?")));
//! ```

pub mod analyzer;
pub mod brackets;
pub mod catalog;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod lexer;
pub mod output;
pub mod passes;
pub mod structure;

// Re-export main types
pub use analyzer::Analyzer;
pub use catalog::{catalog, Catalog};
pub use config::{Config, OutputFormat, Thresholds};
pub use diagnostic::{Diagnostic, Severity, Span};
pub use engine::{Engine, FileDiagnostic, LintResult};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use output::{
    CompactFormatter, GithubFormatter, JsonFormatter, OutputFormatter, TextFormatter,
};
pub use passes::{default_passes, LintPass, PassContext};
