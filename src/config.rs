//! Configuration system for the analyzer and CLI
//!
//! Reads configuration from:
//! - `.drlintrc.yaml` / `.drlintrc.yml` / `.drlintrc.json` (project-level)
//! - `~/.drlintrc.yaml` (user-level)

use crate::diagnostic::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Enable parallel processing
    pub parallel: bool,

    /// Number of parallel jobs (0 = auto-detect)
    pub jobs: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,

    /// Color mode
    pub color: ColorMode,

    /// Verbose output
    pub verbose: bool,

    /// Show statistics
    pub statistics: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: ColorMode::Auto,
            verbose: false,
            statistics: true,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Compact,
    Github,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "compact" => Ok(OutputFormat::Compact),
            "github" => Ok(OutputFormat::Github),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Color mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(format!("Unknown color mode: {}", s)),
        }
    }
}

/// Pass selection and severity overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PassesConfig {
    /// Disabled pass ids
    pub disabled: Vec<String>,

    /// Severity overrides per pass id
    pub severity: HashMap<String, Severity>,

    /// Minimum severity to report
    pub min_severity: Option<Severity>,
}

/// Tunable analysis thresholds.
///
/// The defaults reproduce the precision/recall trade-offs of the original
/// annotator; they are configuration rather than architecture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum span length for the bracket scanner to run at all
    pub min_scan_len: usize,

    /// Minimum content after an unclosed open bracket before it is reported
    pub bracket_trailing_min: usize,

    /// Minimum region length for rule presence checks
    pub rule_region_min: usize,

    /// Minimum fragment length for the lint passes to run
    pub min_fragment_len: usize,

    /// Minimum length of an unterminated quoted run to report
    pub unclosed_string_min: usize,

    /// Minimum `name(args` fragment length to report an unclosed call
    pub call_fragment_min: usize,

    /// Lookahead (in characters) when checking if/for/while completeness
    pub statement_lookahead: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_scan_len: 10,
            bracket_trailing_min: 15,
            rule_region_min: 30,
            min_fragment_len: 10,
            unclosed_string_min: 10,
            call_fragment_min: 5,
            statement_lookahead: 24,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings
    pub engine: EngineConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Pass selection
    pub passes: PassesConfig,

    /// Analysis thresholds
    pub thresholds: Thresholds,
}

impl Config {
    /// Load configuration from a specific file (YAML or JSON by extension)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            _ => Err(ConfigError::Invalid(format!(
                "Unsupported config extension: {}",
                path.display()
            ))),
        }
    }

    /// Discover configuration: project-level file in `dir`, then the
    /// user-level `~/.drlintrc.yaml`, then defaults.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        for name in [".drlintrc.yaml", ".drlintrc.yml", ".drlintrc.json"] {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let candidate = home.join(".drlintrc.yaml");
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }

        Ok(Self::default())
    }

    /// Check whether a pass is enabled
    pub fn is_pass_enabled(&self, id: &str) -> bool {
        !self.passes.disabled.iter().any(|d| d == id)
    }

    /// Severity override for a pass, if configured
    pub fn severity_override(&self, id: &str) -> Option<Severity> {
        self.passes.severity.get(id).copied()
    }

    /// Check whether a severity clears the configured reporting floor
    pub fn meets_min_severity(&self, severity: Severity) -> bool {
        match self.passes.min_severity {
            Some(min) => severity >= min,
            None => true,
        }
    }
}
