//! Analysis configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::synonyms::SynonymTable;

/// Default minimum similarity for a pair to be reported.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.4;
/// Default score at which a pair counts as an exact duplicate instead.
pub const DEFAULT_EXACT_CUTOFF: f64 = 0.95;
/// Default minimum trimmed length (chars) for a section to become a block.
pub const DEFAULT_MIN_SECTION_LENGTH: usize = 100;

/// Top-level analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Subdirectories of the root that hold documents.
    pub content_dirs: Vec<String>,
    /// File extensions (without dot) treated as documents.
    pub extensions: Vec<String>,
    /// Shallowest heading depth that opens a new block.
    pub min_heading_level: usize,
    /// Deepest heading depth that opens a new block.
    pub max_heading_level: usize,
    /// Sections whose trimmed raw text is shorter than this are dropped.
    pub min_section_length: usize,
    /// Lower bound (inclusive) of the reported similarity band. A value at
    /// or above `exact_cutoff` leaves the band empty.
    pub similarity_threshold: f64,
    /// Upper bound (exclusive) of the reported similarity band.
    pub exact_cutoff: f64,
    /// Step lines required for a workflow extraction candidate.
    pub min_workflow_steps: usize,
    /// Shortest extracted term kept (chars, inclusive).
    pub min_term_length: usize,
    /// Longest extracted term kept (chars, inclusive).
    pub max_term_length: usize,
    /// Characters of normalized text shown in duplicate previews.
    pub preview_length: usize,
    /// Width of normalized-length buckets for the similarity search.
    /// `None` compares every pair.
    pub length_band: Option<usize>,
    /// Use the rayon pool for file reads and pair scoring.
    pub parallel: bool,
    pub synonyms: SynonymTable,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            content_dirs: vec![
                "references".to_string(),
                "workflows".to_string(),
                "templates".to_string(),
            ],
            extensions: vec!["md".to_string()],
            min_heading_level: 2,
            max_heading_level: 4,
            min_section_length: DEFAULT_MIN_SECTION_LENGTH,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            exact_cutoff: DEFAULT_EXACT_CUTOFF,
            min_workflow_steps: 3,
            min_term_length: 3,
            max_term_length: 49,
            preview_length: 200,
            length_band: None,
            parallel: true,
            synonyms: SynonymTable::default(),
        }
    }
}

impl AnalysisConfig {
    /// Defaults with the given similarity threshold.
    pub fn with_threshold(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Defaults overlaid with `OVERLAP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay `OVERLAP_*` environment variables onto this configuration.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(v) = env_parse::<f64>("OVERLAP_SIMILARITY_THRESHOLD")? {
            self.similarity_threshold = v;
        }
        if let Some(v) = env_parse::<f64>("OVERLAP_EXACT_CUTOFF")? {
            self.exact_cutoff = v;
        }
        if let Some(v) = env_parse::<usize>("OVERLAP_MIN_SECTION_LENGTH")? {
            self.min_section_length = v;
        }
        if let Some(v) = env_parse::<usize>("OVERLAP_LENGTH_BAND")? {
            self.length_band = if v == 0 { None } else { Some(v) };
        }
        Ok(())
    }

    /// Reject out-of-range settings before any scanning happens.
    pub fn validate(&self) -> Result<()> {
        let t = self.similarity_threshold;
        if !(0.0..1.0).contains(&t) {
            return Err(Error::InvalidThreshold {
                name: "similarity_threshold",
                value: t,
            });
        }
        let c = self.exact_cutoff;
        if !(c > 0.0 && c <= 1.0) {
            return Err(Error::InvalidThreshold {
                name: "exact_cutoff",
                value: c,
            });
        }
        if self.min_heading_level == 0
            || self.max_heading_level > 6
            || self.min_heading_level > self.max_heading_level
        {
            return Err(Error::Config(format!(
                "heading levels must satisfy 1 <= min <= max <= 6, got {}..{}",
                self.min_heading_level, self.max_heading_level
            )));
        }
        if self.min_term_length > self.max_term_length {
            return Err(Error::Config(format!(
                "term length window is empty: {}..{}",
                self.min_term_length, self.max_term_length
            )));
        }
        if self.length_band == Some(0) {
            return Err(Error::Config("length_band must be positive".to_string()));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => {
            debug!("Config override from {}={}", key, raw);
            raw.trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| Error::Config(format!("{} is not a valid value: {:?}", key, raw)))
        }
        Err(_) => Ok(None),
    }
}
