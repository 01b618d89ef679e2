//! Overlap: cross-file content analysis for documentation corpora.

use std::io::Read;

use anyhow::Context;
use clap::Parser;
use overlap_core::AnalysisConfig;
use overlap_runtime::{Analyzer, Report};
use overlap_verify::{verify_findings, Findings};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{AnalyzeArgs, Cli, Commands, VerifyArgs};

fn main() {
    // stdout carries the JSON report; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Analyze(args) => run_analyze(args),
        Commands::Verify(args) => run_verify(args),
    };

    if let Err(e) = result {
        eprintln!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
        std::process::exit(1);
    }
}

/// Defaults (or `--config`), then `OVERLAP_*` variables, then flags.
fn build_config(args: &AnalyzeArgs) -> anyhow::Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    config.apply_env()?;

    if let Some(t) = args.similarity_threshold {
        config.similarity_threshold = t;
    }
    if let Some(c) = args.exact_cutoff {
        config.exact_cutoff = c;
    }
    if let Some(w) = args.length_band {
        config.length_band = if w == 0 { None } else { Some(w) };
    }
    Ok(config)
}

fn run_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    info!(
        "Analyzing {} (threshold={}, cutoff={})",
        args.path.display(),
        config.similarity_threshold,
        config.exact_cutoff
    );
    let report = Analyzer::new(config)?.run(&args.path)?;
    print_json(&report, args.compact)
}

fn run_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.analysis)
        .with_context(|| format!("Analysis file not found: {}", args.analysis.display()))?;
    let report: Report = serde_json::from_str(&raw).context("Invalid JSON in analysis file")?;

    let findings_raw = match &args.findings {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Findings file not found: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read findings from stdin")?;
            buf
        }
    };
    let findings = Findings::from_json(&findings_raw).context("Invalid findings JSON")?;

    let verification = verify_findings(&report, &findings)?;
    print_json(&verification, args.compact)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", text);
    Ok(())
}
