//! Turn analysis results into report rows.

use overlap_analyze::{
    DuplicateGroup, Evidence, ExtractionCandidate, SimilarityCandidate, TerminologyVariant,
};
use overlap_ingest::ContentBlock;

use crate::types::*;

pub fn location(block: &ContentBlock) -> Location {
    Location {
        file: block.file.clone(),
        section: block.header.clone(),
        lines: block.lines(),
    }
}

pub fn block_row(block: &ContentBlock) -> BlockRow {
    BlockRow {
        id: block.id(),
        file: block.file.clone(),
        section: block.header.clone(),
        level: block.level,
        lines: block.lines(),
        content_hash: block.content_hash.clone(),
        normalized_length: block.normalized_length,
    }
}

/// First `max_chars` characters of the normalized text, then `...`.
pub fn preview(block: &ContentBlock, max_chars: usize) -> String {
    let mut out: String = block.normalized().chars().take(max_chars).collect();
    out.push_str("...");
    out
}

pub fn duplicate_row(blocks: &[ContentBlock], group: &DuplicateGroup, preview_length: usize) -> DuplicateRow {
    let first = &blocks[group.members[0]];
    DuplicateRow {
        hash: group.hash.clone(),
        occurrences: group.members.iter().map(|&i| location(&blocks[i])).collect(),
        line_count: first.line_count(),
        content_preview: preview(first, preview_length),
        recommendation: "consolidate".to_string(),
    }
}

/// `threshold` and `exact_cutoff` bound the shown score the same way they
/// bound the raw one.
pub fn similarity_row(
    blocks: &[ContentBlock],
    candidate: &SimilarityCandidate,
    threshold: f64,
    exact_cutoff: f64,
) -> SimilarityRow {
    SimilarityRow {
        source: location(&blocks[candidate.source]),
        target: location(&blocks[candidate.target]),
        similarity: displayed_score(candidate.score, threshold, exact_cutoff),
        review_required: true,
    }
}

pub fn extraction_row(blocks: &[ContentBlock], candidate: &ExtractionCandidate) -> ExtractionRow {
    let block = &blocks[candidate.block];
    let evidence = match &candidate.evidence {
        Evidence::Placeholders(found) => ExtractionEvidence {
            placeholders: Some(found.clone()),
            step_count: None,
        },
        Evidence::StepCount(n) => ExtractionEvidence {
            placeholders: None,
            step_count: Some(*n),
        },
    };
    ExtractionRow {
        kind: candidate.kind,
        pattern: candidate.kind.pattern().to_string(),
        file: block.file.clone(),
        section: block.header.clone(),
        lines: block.lines(),
        evidence,
        recommendation: candidate.kind.recommendation().to_string(),
    }
}

pub fn terminology_row(variant: &TerminologyVariant) -> TerminologyRow {
    TerminologyRow {
        concept: variant.concept.clone(),
        variants: variant
            .variants
            .iter()
            .map(|v| VariantRow {
                term: v.term.clone(),
                files: v.files.clone(),
                count: v.count,
            })
            .collect(),
        canonical: variant.canonical.clone(),
        recommendation: format!("standardize on '{}'", variant.canonical),
    }
}

pub fn summarize(
    exact_duplicates: &[DuplicateRow],
    similarity_candidates: &[SimilarityRow],
    extraction_candidates: &[ExtractionRow],
    terminology_variants: &[TerminologyRow],
) -> Summary {
    Summary {
        exact_duplicate_pairs: exact_duplicates.len(),
        similarity_candidates: similarity_candidates.len(),
        extraction_candidates: extraction_candidates.len(),
        terminology_issues: terminology_variants.len(),
        manual_review_required: !similarity_candidates.is_empty()
            || !extraction_candidates.is_empty()
            || !terminology_variants.is_empty(),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Three-decimal score that stays in `[threshold, exact_cutoff)`. Rounding
/// that would cross a bound goes the other way; the raw score is kept when
/// neither direction fits.
fn displayed_score(score: f64, threshold: f64, exact_cutoff: f64) -> f64 {
    let rounded = round3(score);
    let fits = |v: f64| v >= threshold && v < exact_cutoff;
    if fits(rounded) {
        return rounded;
    }
    let other = if rounded >= exact_cutoff {
        (score * 1000.0).floor() / 1000.0
    } else {
        (score * 1000.0).ceil() / 1000.0
    };
    if fits(other) {
        other
    } else {
        score
    }
}
