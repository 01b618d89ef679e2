//! Claim and verdict types.

use overlap_analyze::ExtractionKind;
use overlap_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything a reviewer claims about one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Findings {
    #[serde(default)]
    pub duplications: Vec<DuplicationClaim>,
    #[serde(default)]
    pub extractions: Vec<ExtractionClaim>,
    #[serde(default)]
    pub terminology: Vec<TerminologyClaim>,
}

impl Findings {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn total_claims(&self) -> usize {
        self.duplications.len() + self.extractions.len() + self.terminology.len()
    }
}

/// A block named by file and heading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionRef {
    pub file: String,
    pub section: String,
}

impl SectionRef {
    pub fn new(file: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            section: section.into(),
        }
    }

    /// `file:section`, the key used for unordered pair matching.
    pub fn key(&self) -> String {
        format!("{}:{}", self.file, self.section)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    TrueDuplicate,
    SimilarConcept,
    FalsePositive,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicationClaim {
    pub source: SectionRef,
    pub target: SectionRef,
    pub classification: Classification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionClaim {
    pub file: String,
    pub section: String,
    #[serde(rename = "type")]
    pub kind: ExtractionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermAction {
    Standardize,
    KeepVariants,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologyClaim {
    pub concept: String,
    #[serde(default)]
    pub standardized_term: String,
    pub action: TermAction,
}

/// Which list a claim came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Duplication,
    Extraction,
    Terminology,
}

/// Why a claim was verified or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    // duplication
    ContentBlocksNotFound,
    ConfirmedExactDuplicate,
    ConfirmedHighSimilarity,
    ConfirmedInCandidates,
    NotInAnalysisCandidates,
    ConfirmedSimilarConcept,
    PairNotInAnalysis,
    FalsePositiveAcknowledged,
    NotACandidateToReject,
    UnknownClassification,
    // extraction
    ConfirmedExtractionCandidate,
    TypeMismatchButCandidateExists,
    ReviewerIdentifiedNewCandidate,
    SectionNotFound,
    // terminology
    ConfirmedStandardization,
    StandardizationTermNotInVariants,
    ConfirmedKeepVariants,
    NoVariantsFoundKeeping,
    ConceptNotInAnalysis,
}

/// Outcome for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(rename = "type")]
    pub kind: ClaimKind,
    pub claim: Value,
    pub reason: Reason,
    /// Reason-specific context (found flags, reported similarity, variants).
    pub details: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    ManualReviewNeeded,
    UnaddressedCandidate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Value>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total_claims: usize,
    pub verified_count: usize,
    pub rejected_count: usize,
    pub warning_count: usize,
    /// Percentage of claims verified, one decimal. 100.0 with no claims.
    pub verification_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub root: String,
    pub verified: Vec<Verdict>,
    pub rejected: Vec<Verdict>,
    pub warnings: Vec<Warning>,
    pub summary: VerificationSummary,
}
