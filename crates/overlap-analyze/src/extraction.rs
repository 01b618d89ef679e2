//! Extraction candidate detection.
//!
//! A block with placeholder syntax is a template candidate. Otherwise a
//! block with enough ordered-step lines is a workflow candidate. Template
//! classification wins when both apply.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use overlap_ingest::ContentBlock;
use regex::Regex;

use crate::types::{Evidence, ExtractionCandidate, ExtractionKind};

/// Default step lines needed for a workflow candidate.
pub const DEFAULT_MIN_WORKFLOW_STEPS: usize = 3;

static PLACEHOLDER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\{\{[A-Z_]+\}\}",  // {{PLACEHOLDER}}
        r"\{[a-z_]+\}",      // {placeholder}
        r"\[INSERT [A-Z]+\]", // [INSERT NAME]
        r"<[A-Z_]+>",        // <PLACEHOLDER>
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static STEP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\s*(?:#{1,6}\s+)?(?:\*\*)?(?:Step|Phase)\s+\d+", // Step 1: / ### Phase 2
        r"^\s*\d+\.\s+\*\*[^*]+\*\*:",                     // 1. **Action**: description
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Distinct placeholder tokens in `text`, sorted.
pub fn find_placeholders(text: &str) -> Vec<String> {
    let found: BTreeSet<String> = PLACEHOLDER_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect();
    found.into_iter().collect()
}

/// Lines that look like ordered steps. Each line counts once.
pub fn count_step_lines(text: &str) -> usize {
    text.lines()
        .filter(|line| STEP_PATTERNS.iter().any(|re| re.is_match(line)))
        .count()
}

/// Classifies blocks as template or workflow candidates.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionDetector {
    pub min_workflow_steps: usize,
}

impl Default for ExtractionDetector {
    fn default() -> Self {
        Self {
            min_workflow_steps: DEFAULT_MIN_WORKFLOW_STEPS,
        }
    }
}

impl ExtractionDetector {
    pub fn new(min_workflow_steps: usize) -> Self {
        Self { min_workflow_steps }
    }

    /// Classify one block, or `None` when it matches neither pattern.
    pub fn classify(&self, block: &ContentBlock) -> Option<(ExtractionKind, Evidence)> {
        let placeholders = find_placeholders(&block.text);
        if !placeholders.is_empty() {
            return Some((ExtractionKind::Template, Evidence::Placeholders(placeholders)));
        }

        let steps = count_step_lines(&block.text);
        if steps > 0 && steps >= self.min_workflow_steps {
            return Some((ExtractionKind::Workflow, Evidence::StepCount(steps)));
        }
        None
    }

    pub fn detect(&self, blocks: &[ContentBlock]) -> Vec<ExtractionCandidate> {
        blocks
            .iter()
            .enumerate()
            .filter_map(|(idx, block)| {
                self.classify(block).map(|(kind, evidence)| ExtractionCandidate {
                    block: idx,
                    kind,
                    evidence,
                })
            })
            .collect()
    }
}

/// Detect candidates with the default step minimum.
pub fn detect_extraction_candidates(blocks: &[ContentBlock]) -> Vec<ExtractionCandidate> {
    ExtractionDetector::default().detect(blocks)
}
