//! icjscore CLI
//!
//! Reads a parsed dossier (source registry, markdown parse, claim extraction),
//! scores every attribution claim, and writes the JSON report.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use icjscore_engine::{score_json, ScoringConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod summary;

#[derive(Parser)]
#[command(name = "icjscore")]
#[command(
    author,
    version,
    about = "Score attribution claims in a parsed dossier against ICJ evidentiary thresholds"
)]
struct Cli {
    /// Input document JSON
    #[arg(short, long)]
    input: PathBuf,

    /// Output report JSON
    #[arg(short, long)]
    output: PathBuf,

    /// Scoring configuration JSON (partial; unspecified fields keep defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a per-claim table to stdout after writing the report
    #[arg(long)]
    summary: bool,

    /// Write single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Debug-level logging (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ScoringConfig> {
    let Some(path) = path else {
        return Ok(ScoringConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    ScoringConfig::from_json_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn cmd_score(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read input {}", cli.input.display()))?;
    let report = score_json(&text, &config)
        .with_context(|| format!("failed to score {}", cli.input.display()))?;
    let json = report
        .to_json_string(!cli.compact)
        .context("failed to serialize report")?;

    if let Some(parent) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&cli.output, json)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    eprintln!(
        "{} {} (claims={})",
        "wrote".green().bold(),
        cli.output.display().to_string().bold(),
        report.document_scores.claims_total
    );

    if cli.summary {
        print!("{}", summary::render(&report).context("failed to render summary")?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cmd_score(&cli)
}
