//! docscan - Entry Point
//!
//! Audits exported TypeScript declarations for doc comments and, with
//! `--fix`, inserts or completes them in place.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | `0` | Clean check, or fix completed |
//! | `1` | Check found missing docs, or a fix-mode write failed |
//! | `2` | Invalid invocation or configuration |

mod logging;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use docscan_validate::{AuditMode, Auditor, ConfigLoader, Reporter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for invalid invocation or configuration
const EXIT_USAGE: u8 = 2;

/// Report format on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Command line interface for docscan
#[derive(Parser, Debug)]
#[command(name = "docscan")]
#[command(about = "Documentation coverage for exported TypeScript declarations")]
#[command(version)]
pub struct Cli {
    /// Directory to scan (default: `root` from config, else `src`)
    pub root: Option<PathBuf>,

    /// Insert missing doc blocks and complete existing ones
    #[arg(long)]
    pub fix: bool,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Worker threads (0 = one per CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Also require docs on exported non-callable variables
    #[arg(long)]
    pub include_variables: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load().context("failed to load configuration")?;

    if let Some(root) = &cli.root {
        config.root.clone_from(root);
    }
    if let Some(jobs) = cli.jobs {
        config.general.jobs = jobs;
    }
    if cli.include_variables {
        config.analysis.include_variables = true;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(0);
    }

    logging::init_logging(&config.logging)?;
    match loader.source_file() {
        Some(file) => tracing::debug!("Configuration loaded from {}", file.display()),
        None => tracing::debug!("No configuration file, using defaults"),
    }
    if !config.root.is_dir() {
        bail!("root directory not found: {}", config.root.display());
    }

    let mode = if cli.fix {
        AuditMode::Fix
    } else {
        AuditMode::Check
    };
    let auditor = Auditor::new(config)?;
    let report = auditor.run(mode)?;

    match cli.format {
        OutputFormat::Human => print!("{}", Reporter::to_human_readable(&report)),
        OutputFormat::Json => println!("{}", Reporter::to_json(&report)),
    }
    for line in Reporter::write_failure_lines(&report) {
        eprintln!("{line}");
    }
    Ok(report.exit_code())
}
