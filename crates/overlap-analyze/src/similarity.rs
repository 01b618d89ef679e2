//! Pairwise near-duplicate search across documents.
//!
//! Every unordered pair of blocks is considered once. Pairs are skipped
//! when either block is already an exact duplicate, when both blocks come
//! from the same file, or when their lengths alone put the score below the
//! threshold. The remaining pairs are scored with the matching-blocks ratio
//! over normalized text and kept when `threshold <= score < exact_cutoff`.
//!
//! Cost is quadratic in block count. `length_band` enables bucketing by
//! normalized length: only blocks in the same or adjacent bands are
//! compared. Pairs in bands further apart are never scored, so bucketing
//! trades recall at band boundaries for speed.

use std::cmp::Ordering;
use std::collections::HashSet;

use overlap_core::AnalysisConfig;
use overlap_ingest::ContentBlock;
use rayon::prelude::*;
use tracing::debug;

use crate::matcher::{ratio, ratio_upper_bound};
use crate::types::SimilarityCandidate;

/// Similarity of two normalized strings.
///
/// Operands are ordered (shorter first, then lexicographically) before
/// matching, which makes the score exactly symmetric.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    symmetric_ratio(&a, &b)
}

/// Similarity of two blocks over their normalized text.
pub fn block_similarity(a: &ContentBlock, b: &ContentBlock) -> f64 {
    similarity(&a.normalized(), &b.normalized())
}

fn symmetric_ratio(a: &[char], b: &[char]) -> f64 {
    match a.len().cmp(&b.len()).then_with(|| a.cmp(b)) {
        Ordering::Greater => ratio(b, a),
        _ => ratio(a, b),
    }
}

/// Normalized-length band of a block under bucketing.
pub fn band_of(normalized_length: usize, band_width: usize) -> usize {
    normalized_length / band_width.max(1)
}

/// Settings for the pair search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilaritySearch {
    pub threshold: f64,
    pub exact_cutoff: f64,
    pub length_band: Option<usize>,
    pub parallel: bool,
}

impl SimilaritySearch {
    pub fn new(threshold: f64, exact_cutoff: f64) -> Self {
        Self {
            threshold,
            exact_cutoff,
            length_band: None,
            parallel: true,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            threshold: config.similarity_threshold,
            exact_cutoff: config.exact_cutoff,
            length_band: config.length_band,
            parallel: config.parallel,
        }
    }

    pub fn with_length_band(mut self, band_width: Option<usize>) -> Self {
        self.length_band = band_width;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Whether bucketing lets this pair through to scoring.
    fn bands_compatible(&self, a: &ContentBlock, b: &ContentBlock) -> bool {
        match self.length_band {
            Some(width) => {
                let (ba, bb) = (band_of(a.normalized_length, width), band_of(b.normalized_length, width));
                ba.abs_diff(bb) <= 1
            }
            None => true,
        }
    }

    /// Find cross-file pairs scoring in `[threshold, exact_cutoff)`,
    /// sorted by score descending.
    pub fn find(&self, blocks: &[ContentBlock], exact_hashes: &HashSet<String>) -> Vec<SimilarityCandidate> {
        if self.threshold >= self.exact_cutoff {
            debug!("Similarity band is empty: threshold {} >= cutoff {}", self.threshold, self.exact_cutoff);
            return Vec::new();
        }
        let eligible: Vec<usize> = (0..blocks.len())
            .filter(|&i| !exact_hashes.contains(&blocks[i].content_hash))
            .collect();
        let normalized: Vec<Vec<char>> = blocks
            .iter()
            .map(|b| b.normalized().chars().collect())
            .collect();

        let score_row = |pos: usize| -> Vec<SimilarityCandidate> {
            let i = eligible[pos];
            let mut row = Vec::new();
            for &j in &eligible[pos + 1..] {
                if let Some(candidate) = self.score_pair(blocks, &normalized, i, j) {
                    row.push(candidate);
                }
            }
            row
        };

        let mut candidates: Vec<SimilarityCandidate> = if self.parallel {
            (0..eligible.len()).into_par_iter().flat_map_iter(score_row).collect()
        } else {
            (0..eligible.len()).flat_map(score_row).collect()
        };

        candidates.sort_by(|x, y| {
            y.score
                .total_cmp(&x.score)
                .then_with(|| block_key(&blocks[x.source]).cmp(&block_key(&blocks[y.source])))
                .then_with(|| block_key(&blocks[x.target]).cmp(&block_key(&blocks[y.target])))
        });

        debug!(
            "Similarity search: {} eligible blocks, {} candidates",
            eligible.len(),
            candidates.len()
        );
        candidates
    }

    fn score_pair(
        &self,
        blocks: &[ContentBlock],
        normalized: &[Vec<char>],
        i: usize,
        j: usize,
    ) -> Option<SimilarityCandidate> {
        let (a, b) = (&blocks[i], &blocks[j]);
        if a.file == b.file || !self.bands_compatible(a, b) {
            return None;
        }
        let (na, nb) = (&normalized[i], &normalized[j]);
        if ratio_upper_bound(na.len(), nb.len()) < self.threshold {
            return None;
        }

        let score = symmetric_ratio(na, nb);
        if score < self.threshold || score >= self.exact_cutoff {
            return None;
        }

        let (source, target) = if block_key(a) <= block_key(b) { (i, j) } else { (j, i) };
        Some(SimilarityCandidate {
            source,
            target,
            score,
        })
    }
}

/// Canonical pair orientation key.
fn block_key(block: &ContentBlock) -> (&str, usize, &str) {
    (block.file.as_str(), block.start_line, block.header.as_str())
}

/// Find similarity candidates with the given band and no bucketing.
pub fn find_similar_pairs(
    blocks: &[ContentBlock],
    threshold: f64,
    exact_cutoff: f64,
    exact_hashes: &HashSet<String>,
) -> Vec<SimilarityCandidate> {
    SimilaritySearch::new(threshold, exact_cutoff).find(blocks, exact_hashes)
}
