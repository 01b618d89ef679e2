//! Analysis result types. Blocks are referenced by index into the arena.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Blocks whose normalized text hashes identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub hash: String,
    /// Indices into the block list, in list order. Always 2 or more.
    pub members: Vec<usize>,
}

/// A cross-file pair scoring inside the reported similarity band.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityCandidate {
    /// Block with the smaller `(file, start_line)`.
    pub source: usize,
    pub target: usize,
    pub score: f64,
}

/// Structural pattern that makes a block worth extracting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionKind {
    Template,
    Workflow,
}

impl ExtractionKind {
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Template => "placeholder_structure",
            Self::Workflow => "step_sequence",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Template => "extract_to_templates",
            Self::Workflow => "extract_to_workflows",
        }
    }
}

impl std::fmt::Display for ExtractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Template => write!(f, "template"),
            Self::Workflow => write!(f, "workflow"),
        }
    }
}

/// What triggered an extraction classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    /// Distinct placeholder tokens, sorted.
    Placeholders(Vec<String>),
    StepCount(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionCandidate {
    pub block: usize,
    pub kind: ExtractionKind,
    pub evidence: Evidence,
}

/// file → term → occurrences.
pub type TermTable = BTreeMap<String, BTreeMap<String, usize>>;

/// One surface form of a concept and where it was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermVariant {
    pub term: String,
    /// Sorted, distinct.
    pub files: Vec<String>,
    pub count: usize,
}

/// Two or more distinct terms mapping to one synonym group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminologyVariant {
    pub concept: String,
    /// Sorted by count descending, then term.
    pub variants: Vec<TermVariant>,
    /// Highest-count variant.
    pub canonical: String,
}
