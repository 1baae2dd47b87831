//! Output formatters for lint results

mod compact;
mod github;
mod json;
mod text;

pub use compact::CompactFormatter;
pub use github::GithubFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::config::OutputFormat;
use crate::engine::{FileDiagnostic, LintResult};

/// Output formatter trait
pub trait OutputFormatter: Send + Sync {
    /// Format the entire lint result
    fn format(&self, result: &LintResult) -> String;

    /// Format a single diagnostic
    fn format_diagnostic(&self, diagnostic: &FileDiagnostic) -> String;
}

/// Build the formatter for a configured output format
pub fn formatter_for(
    format: OutputFormat,
    colored: bool,
    show_stats: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => {
            let mut f = TextFormatter::new();
            f.colored = colored;
            f.show_stats = show_stats;
            Box::new(f)
        }
        OutputFormat::Json => Box::new(JsonFormatter::new().pretty()),
        OutputFormat::Compact => Box::new(CompactFormatter::new()),
        OutputFormat::Github => Box::new(GithubFormatter::new()),
    }
}
