//! drlint CLI - Drools rule file linter
//!
//! A fast, heuristic linter for Drools rule language (.drl) files.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use drlint::config::{ColorMode, Config, OutputFormat};
use drlint::diagnostic::Severity;
use drlint::engine::Engine;
use drlint::lexer::tokenize;
use drlint::output::formatter_for;
use glob::glob;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "drlint",
    version,
    about = "Drools Rule File Linter",
    long_about = "A fast, heuristic linter for Drools rule language (.drl) files. \
                  Checks bracket balance, rule structure, and common authoring mistakes."
)]
struct Cli {
    /// Files or glob patterns to lint
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value = "0")]
    jobs: usize,

    /// Disable specific passes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Option<Vec<String>>,

    /// Minimum severity to report
    #[arg(long, value_enum)]
    min_severity: Option<MinSeverity>,

    /// Show statistics
    #[arg(long)]
    stats: bool,

    /// List available passes and exit
    #[arg(long)]
    list_passes: bool,

    /// Dump the token stream of each file instead of linting
    #[arg(long)]
    dump_tokens: bool,

    /// Exit with 0 even if errors are found
    #[arg(long)]
    exit_zero: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Compact,
    Github,
}

#[derive(Clone, Copy, ValueEnum)]
enum MinSeverity {
    WeakWarning,
    Warning,
    Error,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::discover(std::path::Path::new("."))?,
    };

    // Merge CLI arguments over the loaded configuration
    config.output.format = match cli.format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Compact => OutputFormat::Compact,
        Format::Github => OutputFormat::Github,
    };
    if cli.verbose {
        config.output.verbose = true;
    }
    if cli.no_color {
        config.output.color = ColorMode::Never;
    }
    if cli.jobs > 0 {
        config.engine.jobs = cli.jobs;
    }
    if let Some(disable) = &cli.disable {
        config.passes.disabled.extend(disable.iter().cloned());
    }
    if let Some(min) = cli.min_severity {
        config.passes.min_severity = Some(match min {
            MinSeverity::WeakWarning => Severity::WeakWarning,
            MinSeverity::Warning => Severity::Warning,
            MinSeverity::Error => Severity::Error,
        });
    }
    if cli.stats {
        config.output.statistics = true;
    }

    let engine = Engine::new(config.clone());

    if cli.list_passes {
        list_passes(&engine);
        return Ok(0);
    }

    if cli.files.is_empty() {
        eprintln!("{}: No files specified", "error".red().bold());
        eprintln!();
        eprintln!("Usage: drlint [OPTIONS] <FILES>...");
        eprintln!();
        eprintln!("For more information, try '--help'");
        return Ok(2);
    }

    // Expand glob patterns
    let mut files: Vec<PathBuf> = Vec::new();
    for pattern in &cli.files {
        let paths = glob(pattern).with_context(|| format!("invalid pattern '{}'", pattern))?;
        for entry in paths.flatten() {
            if entry.is_file() {
                files.push(entry);
            }
        }
    }

    if files.is_empty() {
        eprintln!("{}: No files found to lint", "error".red().bold());
        return Ok(2);
    }

    if cli.dump_tokens {
        for file in &files {
            dump_tokens(file)?;
        }
        return Ok(0);
    }

    if config.output.verbose {
        eprintln!("Linting {} file(s)...", files.len());
    }

    let result = engine.lint(&files);

    let colored_output = !cli.no_color && config.output.color != ColorMode::Never;
    let show_stats = cli.stats || config.output.statistics;
    let formatter = formatter_for(config.output.format, colored_output, show_stats);
    print!("{}", formatter.format(&result));

    Ok(if cli.exit_zero { 0 } else { result.exit_code() })
}

fn list_passes(engine: &Engine) {
    println!("{}", "Available passes:".bold());
    println!();
    println!(
        "    {} [{}]",
        drlint::brackets::PASS_ID.cyan(),
        "error".red()
    );
    println!("      Unbalanced brackets outside strings and comments");
    println!(
        "    {} [{}]",
        drlint::structure::PASS_ID.cyan(),
        "error".red()
    );
    println!("      Rule clause presence, ordering, and attribute values");
    for pass in engine.analyzer().passes() {
        println!("    {}", pass.id().cyan());
        println!("      {}", pass.description());
    }
}

fn dump_tokens(file: &PathBuf) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    println!("{}", file.display().to_string().underline());
    for token in tokenize(&content) {
        println!(
            "  {:>5}..{:<5} {:?} {:?}",
            token.start,
            token.end,
            token.kind,
            token.text(&content)
        );
    }
    Ok(())
}
