//! Claim verification against a report.

use std::collections::HashSet;

use overlap_core::Result;
use overlap_runtime::{BlockRow, ExtractionRow, Location, Report, SimilarityRow, TerminologyRow};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::types::*;

/// Reported similarity at or above which a `true_duplicate` claim counts as
/// confirmed by score alone.
pub const HIGH_SIMILARITY: f64 = 0.8;

struct Outcome {
    verified: bool,
    reason: Reason,
    details: Value,
}

impl Outcome {
    fn verified(reason: Reason, details: Value) -> Self {
        Self {
            verified: true,
            reason,
            details,
        }
    }

    fn rejected(reason: Reason, details: Value) -> Self {
        Self {
            verified: false,
            reason,
            details,
        }
    }
}

fn same_section(loc: &Location, section: &SectionRef) -> bool {
    loc.file == section.file && loc.section == section.section
}

fn location_key(loc: &Location) -> String {
    format!("{}:{}", loc.file, loc.section)
}

fn pair_key(a: String, b: String) -> (String, String) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Checks claims against one report.
pub struct Verifier<'a> {
    report: &'a Report,
}

impl<'a> Verifier<'a> {
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    fn find_block(&self, section: &SectionRef) -> Option<&'a BlockRow> {
        self.report
            .content_blocks
            .iter()
            .find(|b| b.file == section.file && b.section == section.section)
    }

    /// Candidate for the pair in either orientation.
    fn find_candidate(&self, a: &SectionRef, b: &SectionRef) -> Option<&'a SimilarityRow> {
        self.report.similarity_candidates.iter().find(|c| {
            (same_section(&c.source, a) && same_section(&c.target, b))
                || (same_section(&c.source, b) && same_section(&c.target, a))
        })
    }

    /// Both files and both headings appear among one group's occurrences.
    fn in_exact(&self, a: &SectionRef, b: &SectionRef) -> bool {
        self.report.exact_duplicates.iter().any(|group| {
            let has_file = |f: &str| group.occurrences.iter().any(|o| o.file == f);
            let has_section = |s: &str| group.occurrences.iter().any(|o| o.section == s);
            has_file(&a.file) && has_file(&b.file) && has_section(&a.section) && has_section(&b.section)
        })
    }

    fn find_extraction(&self, file: &str, section: &str) -> Option<&'a ExtractionRow> {
        self.report
            .extraction_candidates
            .iter()
            .find(|c| c.file == file && c.section == section)
    }

    fn find_concept(&self, concept: &str) -> Option<&'a TerminologyRow> {
        let wanted = concept.to_lowercase();
        self.report
            .terminology_variants
            .iter()
            .find(|v| v.concept.to_lowercase() == wanted)
    }

    fn check_duplication(&self, claim: &DuplicationClaim) -> Outcome {
        let source_block = self.find_block(&claim.source);
        let target_block = self.find_block(&claim.target);
        if source_block.is_none() || target_block.is_none() {
            return Outcome::rejected(
                Reason::ContentBlocksNotFound,
                json!({
                    "source_found": source_block.is_some(),
                    "target_found": target_block.is_some(),
                }),
            );
        }

        let candidate = self.find_candidate(&claim.source, &claim.target);
        let similarity = candidate.map(|c| c.similarity);
        let in_exact = self.in_exact(&claim.source, &claim.target);

        match claim.classification {
            Classification::TrueDuplicate => {
                if in_exact {
                    Outcome::verified(
                        Reason::ConfirmedExactDuplicate,
                        json!({ "verification_method": "hash_match" }),
                    )
                } else if similarity.is_some_and(|s| s >= HIGH_SIMILARITY) {
                    Outcome::verified(
                        Reason::ConfirmedHighSimilarity,
                        json!({
                            "similarity": similarity,
                            "verification_method": "similarity_threshold",
                        }),
                    )
                } else if candidate.is_some() {
                    Outcome::verified(
                        Reason::ConfirmedInCandidates,
                        json!({
                            "similarity": similarity,
                            "note": "reviewer judgment accepted",
                        }),
                    )
                } else {
                    Outcome::rejected(
                        Reason::NotInAnalysisCandidates,
                        json!({ "in_exact": in_exact, "in_similarity": false }),
                    )
                }
            }
            Classification::SimilarConcept => match candidate {
                Some(_) => Outcome::verified(
                    Reason::ConfirmedSimilarConcept,
                    json!({ "similarity": similarity }),
                ),
                None => Outcome::rejected(Reason::PairNotInAnalysis, json!({})),
            },
            Classification::FalsePositive => {
                if candidate.is_some() || in_exact {
                    Outcome::verified(
                        Reason::FalsePositiveAcknowledged,
                        json!({
                            "was_candidate": candidate.is_some(),
                            "was_exact": in_exact,
                        }),
                    )
                } else {
                    Outcome::rejected(Reason::NotACandidateToReject, json!({}))
                }
            }
            Classification::Unknown => Outcome::rejected(
                Reason::UnknownClassification,
                json!({ "classification": claim.classification }),
            ),
        }
    }

    fn check_extraction(&self, claim: &ExtractionClaim) -> Outcome {
        if let Some(found) = self.find_extraction(&claim.file, &claim.section) {
            return if found.kind == claim.kind {
                Outcome::verified(
                    Reason::ConfirmedExtractionCandidate,
                    json!({
                        "analysis_type": found.kind,
                        "analysis_pattern": found.pattern,
                        "reviewer_recommendation": claim.recommendation,
                    }),
                )
            } else {
                Outcome::verified(
                    Reason::TypeMismatchButCandidateExists,
                    json!({
                        "claimed_type": claim.kind,
                        "analysis_type": found.kind,
                    }),
                )
            };
        }

        let section = SectionRef::new(claim.file.as_str(), claim.section.as_str());
        if self.find_block(&section).is_some() {
            return Outcome::verified(
                Reason::ReviewerIdentifiedNewCandidate,
                json!({
                    "note": "extraction opportunity not detected by the analysis",
                    "requires_manual_review": true,
                }),
            );
        }

        Outcome::rejected(
            Reason::SectionNotFound,
            json!({ "file": claim.file, "section": claim.section }),
        )
    }

    fn check_terminology(&self, claim: &TerminologyClaim) -> Outcome {
        if let Some(found) = self.find_concept(&claim.concept) {
            let terms: Vec<&str> = found.variants.iter().map(|v| v.term.as_str()).collect();
            match claim.action {
                TermAction::Standardize => {
                    let chosen = claim.standardized_term.to_lowercase();
                    let reason = if terms.iter().any(|t| t.to_lowercase() == chosen) {
                        Reason::ConfirmedStandardization
                    } else {
                        Reason::StandardizationTermNotInVariants
                    };
                    return Outcome::verified(
                        reason,
                        json!({
                            "available_variants": terms,
                            "chosen_standard": claim.standardized_term,
                        }),
                    );
                }
                TermAction::KeepVariants => {
                    return Outcome::verified(
                        Reason::ConfirmedKeepVariants,
                        json!({ "variants": terms }),
                    );
                }
                TermAction::Unknown => {}
            }
        }

        if claim.action == TermAction::KeepVariants {
            return Outcome::verified(Reason::NoVariantsFoundKeeping, json!({}));
        }
        Outcome::rejected(
            Reason::ConceptNotInAnalysis,
            json!({ "concept": claim.concept }),
        )
    }

    /// Verify every claim and flag similarity candidates nobody addressed.
    pub fn verify(&self, findings: &Findings) -> Result<VerificationReport> {
        let mut verified = Vec::new();
        let mut rejected = Vec::new();
        let mut warnings = Vec::new();

        let mut record = |kind: ClaimKind, claim: Value, outcome: Outcome| {
            debug!("{:?} claim -> {:?}", kind, outcome.reason);
            let verdict = Verdict {
                kind,
                claim,
                reason: outcome.reason,
                details: outcome.details,
            };
            if outcome.verified {
                verified.push(verdict);
            } else {
                rejected.push(verdict);
            }
        };

        for claim in &findings.duplications {
            record(ClaimKind::Duplication, serde_json::to_value(claim)?, self.check_duplication(claim));
        }

        for claim in &findings.extractions {
            let outcome = self.check_extraction(claim);
            let value = serde_json::to_value(claim)?;
            if outcome.reason == Reason::ReviewerIdentifiedNewCandidate {
                warnings.push(Warning {
                    kind: WarningKind::ManualReviewNeeded,
                    claim: Some(value.clone()),
                    candidate: None,
                    reason: "reviewer identified an opportunity not in the analysis".to_string(),
                });
            }
            record(ClaimKind::Extraction, value, outcome);
        }

        for claim in &findings.terminology {
            record(ClaimKind::Terminology, serde_json::to_value(claim)?, self.check_terminology(claim));
        }

        let addressed: HashSet<(String, String)> = findings
            .duplications
            .iter()
            .map(|c| pair_key(c.source.key(), c.target.key()))
            .collect();
        for candidate in &self.report.similarity_candidates {
            let key = pair_key(location_key(&candidate.source), location_key(&candidate.target));
            if !addressed.contains(&key) {
                warnings.push(Warning {
                    kind: WarningKind::UnaddressedCandidate,
                    claim: None,
                    candidate: Some(serde_json::to_value(candidate)?),
                    reason: "similarity candidate not addressed by any claim".to_string(),
                });
            }
        }

        let total_claims = findings.total_claims();
        let verification_rate = if total_claims > 0 {
            (verified.len() as f64 / total_claims as f64 * 1000.0).round() / 10.0
        } else {
            100.0
        };
        let summary = VerificationSummary {
            total_claims,
            verified_count: verified.len(),
            rejected_count: rejected.len(),
            warning_count: warnings.len(),
            verification_rate,
        };

        info!(
            "Verification complete: {}/{} claims verified, {} rejected, {} warnings",
            summary.verified_count, summary.total_claims, summary.rejected_count, summary.warning_count
        );

        Ok(VerificationReport {
            root: self.report.root.clone(),
            verified,
            rejected,
            warnings,
            summary,
        })
    }
}

/// Verify `findings` against `report`.
pub fn verify_findings(report: &Report, findings: &Findings) -> Result<VerificationReport> {
    Verifier::new(report).verify(findings)
}
