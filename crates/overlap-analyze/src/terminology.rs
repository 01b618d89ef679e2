//! Terminology extraction and synonym-based variant grouping.
//!
//! Stage one collects candidate terms per file from structural patterns:
//! the block's heading, bold definitions (`**Term**:`), nested heading
//! lines, single-asterisk emphasis and inline code. Stage two maps terms
//! onto the configured synonym groups and reports groups that collected
//! two or more distinct surface forms.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use overlap_core::{AnalysisConfig, SynonymTable};
use overlap_ingest::normalize::strip_fenced_code;
use overlap_ingest::{ContentBlock, INTRO_HEADER};
use regex::Regex;

use crate::types::{TermTable, TermVariant, TerminologyVariant};

static DEFINITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*:").unwrap());
static HEADING_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s+(.+)$").unwrap());
static STARRED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\*+)([^*\n]+)(\*+)").unwrap());
static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Pulls candidate terms out of blocks.
#[derive(Debug, Clone, Copy)]
pub struct TermExtractor {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for TermExtractor {
    fn default() -> Self {
        Self {
            min_len: 3,
            max_len: 49,
        }
    }
}

impl TermExtractor {
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.min_term_length, config.max_term_length)
    }

    /// Raw term matches in one block, in pattern order.
    pub fn block_terms(&self, block: &ContentBlock) -> Vec<String> {
        let text = strip_fenced_code(&block.text);
        let mut raw: Vec<String> = Vec::new();

        if block.header != INTRO_HEADER {
            raw.push(block.header.clone());
        }
        raw.extend(DEFINITION.captures_iter(&text).map(|c| c[1].to_string()));
        raw.extend(HEADING_LINE.captures_iter(&text).map(|c| c[1].to_string()));
        raw.extend(
            STARRED
                .captures_iter(&text)
                .filter(|c| c[1].len() == 1 && c[3].len() == 1)
                .map(|c| c[2].to_string()),
        );
        raw.extend(CODE_SPAN.captures_iter(&text).map(|c| c[1].to_string()));

        raw.into_iter().filter_map(|t| self.clean(&t)).collect()
    }

    /// Lowercase, trim, and apply the length window.
    fn clean(&self, term: &str) -> Option<String> {
        let term = term.trim().to_lowercase();
        let len = term.chars().count();
        (len >= self.min_len && len <= self.max_len).then_some(term)
    }

    /// Per-file term frequency table.
    pub fn extract(&self, blocks: &[ContentBlock]) -> TermTable {
        let mut table = TermTable::new();
        for block in blocks {
            let counts = table.entry(block.file.clone()).or_default();
            for term in self.block_terms(block) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }
        table.retain(|_, terms| !terms.is_empty());
        table
    }
}

/// Map extracted terms onto synonym groups and report inconsistencies.
pub fn group_variants(table: &TermTable, synonyms: &SynonymTable) -> Vec<TerminologyVariant> {
    let mut out = Vec::new();

    for group in synonyms.groups() {
        // term → (files, total count)
        let mut found: BTreeMap<&str, (BTreeSet<&str>, usize)> = BTreeMap::new();
        for (file, terms) in table {
            for (term, &count) in terms {
                if group.matches(term) {
                    let entry = found.entry(term.as_str()).or_default();
                    entry.0.insert(file.as_str());
                    entry.1 += count;
                }
            }
        }

        if found.len() < 2 {
            continue;
        }

        let mut variants: Vec<TermVariant> = found
            .into_iter()
            .map(|(term, (files, count))| TermVariant {
                term: term.to_string(),
                files: files.into_iter().map(str::to_string).collect(),
                count,
            })
            .collect();
        variants.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));

        let canonical = variants[0].term.clone();
        out.push(TerminologyVariant {
            concept: group.concept.clone(),
            variants,
            canonical,
        });
    }

    out
}
