//! Report types.

use overlap_analyze::ExtractionKind;
use serde::{Deserialize, Serialize};

/// Full analysis report for one corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub root: String,
    pub root_name: String,
    pub files_analyzed: usize,
    pub total_lines: usize,
    pub config: ReportConfig,
    pub content_blocks: Vec<BlockRow>,
    pub exact_duplicates: Vec<DuplicateRow>,
    pub similarity_candidates: Vec<SimilarityRow>,
    pub extraction_candidates: Vec<ExtractionRow>,
    pub terminology_variants: Vec<TerminologyRow>,
    pub summary: Summary,
}

/// Settings the report was produced with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub similarity_threshold: f64,
    pub exact_cutoff: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_band: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRow {
    pub id: String,
    pub file: String,
    pub section: String,
    pub level: usize,
    pub lines: String,
    pub content_hash: String,
    pub normalized_length: usize,
}

/// Where a block lives: file, heading, line span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub section: String,
    pub lines: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRow {
    pub hash: String,
    pub occurrences: Vec<Location>,
    pub line_count: usize,
    pub content_preview: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRow {
    pub source: Location,
    pub target: Location,
    /// Rounded to three decimals.
    pub similarity: f64,
    pub review_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRow {
    #[serde(rename = "type")]
    pub kind: ExtractionKind,
    pub pattern: String,
    pub file: String,
    pub section: String,
    pub lines: String,
    pub evidence: ExtractionEvidence,
    pub recommendation: String,
}

/// Pattern-specific evidence; exactly one field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionEvidence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholders: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologyRow {
    pub concept: String,
    pub variants: Vec<VariantRow>,
    pub canonical: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRow {
    pub term: String,
    pub files: Vec<String>,
    pub count: usize,
}

/// Aggregate counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub exact_duplicate_pairs: usize,
    pub similarity_candidates: usize,
    pub extraction_candidates: usize,
    pub terminology_issues: usize,
    /// Set when any similarity, extraction or terminology finding exists.
    pub manual_review_required: bool,
}
