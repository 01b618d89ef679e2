use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// `overlap`: finds duplicated, near-duplicate and inconsistent content
/// across a documentation corpus.
#[derive(Parser, Debug)]
#[command(name = "overlap", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Analyze a corpus and print the JSON report.
    Analyze(AnalyzeArgs),
    /// Check reviewer findings against a saved report.
    Verify(VerifyArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Corpus root containing the content directories.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Minimum similarity for a pair to be reported, in [0, 1).
    #[arg(long)]
    pub similarity_threshold: Option<f64>,

    /// Scores at or above this are treated as exact and not reported as pairs.
    #[arg(long)]
    pub exact_cutoff: Option<f64>,

    /// JSON configuration file. Flags and OVERLAP_* variables override it.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only compare blocks in the same or adjacent normalized-length bands of this width.
    #[arg(long, value_name = "N")]
    pub length_band: Option<usize>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Report produced by `overlap analyze`.
    #[arg(long, value_name = "FILE")]
    pub analysis: PathBuf,

    /// Findings JSON. Read from stdin when absent.
    #[arg(long, value_name = "FILE")]
    pub findings: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}
