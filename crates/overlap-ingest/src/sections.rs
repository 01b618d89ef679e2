//! Heading-delimited section extraction.
//!
//! A document is cut into content blocks at heading lines whose depth lies
//! in the configured range. Text before the first heading becomes the
//! `_intro` block (level 0). Deeper or shallower headings stay part of the
//! surrounding block's content. Blocks whose trimmed text is shorter than
//! the minimum length are dropped, as are blocks with no text left after
//! normalization.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use overlap_core::{AnalysisConfig, Error, Result};

use crate::normalize::{hash_normalized, normalize};

/// Header sentinel for content that precedes the first heading.
pub const INTRO_HEADER: &str = "_intro";

static DEFAULT_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{2,4})\s+(.+)$").unwrap());

/// One heading-delimited region of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlock {
    /// Document path relative to the analysis root.
    pub file: String,
    pub header: String,
    /// Heading depth, 0 for the intro block.
    pub level: usize,
    /// 1-based, inclusive.
    pub start_line: usize,
    /// 1-based, inclusive.
    pub end_line: usize,
    /// Raw, unnormalized block text (heading line excluded).
    #[serde(skip)]
    pub text: String,
    pub content_hash: String,
    pub normalized_length: usize,
}

impl ContentBlock {
    /// Build a block, computing hash and normalized length from `text`.
    pub fn new(
        file: impl Into<String>,
        header: impl Into<String>,
        level: usize,
        start_line: usize,
        end_line: usize,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let normalized = normalize(&text);
        Self {
            file: file.into(),
            header: header.into(),
            level,
            start_line,
            end_line,
            content_hash: hash_normalized(&normalized),
            normalized_length: normalized.chars().count(),
            text,
        }
    }

    /// Stable identifier: `file:header`, path separators and spaces folded.
    pub fn id(&self) -> String {
        format!("{}:{}", self.file, self.header)
            .replace('/', ":")
            .replace(' ', "-")
            .to_lowercase()
    }

    /// Line span rendered as `start-end`.
    pub fn lines(&self) -> String {
        format!("{}-{}", self.start_line, self.end_line)
    }

    pub fn line_count(&self) -> usize {
        self.end_line + 1 - self.start_line
    }

    /// Normalized text, recomputed on demand.
    pub fn normalized(&self) -> String {
        normalize(&self.text)
    }
}

/// Splits documents into content blocks.
pub struct SectionExtractor {
    heading: Regex,
    min_section_length: usize,
}

impl SectionExtractor {
    pub fn new(min_level: usize, max_level: usize, min_section_length: usize) -> Result<Self> {
        if min_level == 0 || min_level > max_level || max_level > 6 {
            return Err(Error::Config(format!(
                "invalid heading level range {}..{}",
                min_level, max_level
            )));
        }
        let pattern = format!(r"^(#{{{},{}}})\s+(.+)$", min_level, max_level);
        let heading = Regex::new(&pattern).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self {
            heading,
            min_section_length,
        })
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Self::new(
            config.min_heading_level,
            config.max_heading_level,
            config.min_section_length,
        )
    }

    /// Split `content` into blocks tagged with `file`.
    pub fn extract(&self, content: &str, file: &str) -> Vec<ContentBlock> {
        let lines: Vec<&str> = content.split('\n').collect();
        let mut blocks = Vec::new();

        let mut header = INTRO_HEADER.to_string();
        let mut level = 0usize;
        let mut start_line = 1usize;
        let mut body: Vec<&str> = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let line_no = idx + 1;
            if let Some(caps) = self.heading.captures(line) {
                self.flush(&mut blocks, file, &header, level, start_line, line_no - 1, &body);

                header = caps[2].trim().to_string();
                level = caps[1].len();
                start_line = line_no;
                body.clear();
            } else {
                body.push(line);
            }
        }

        self.flush(&mut blocks, file, &header, level, start_line, lines.len(), &body);
        blocks
    }

    #[allow(clippy::too_many_arguments)]
    fn flush(
        &self,
        blocks: &mut Vec<ContentBlock>,
        file: &str,
        header: &str,
        level: usize,
        start_line: usize,
        end_line: usize,
        body: &[&str],
    ) {
        if body.is_empty() {
            return;
        }
        let text = body.join("\n");
        if text.trim().chars().count() < self.min_section_length {
            return;
        }
        let block = ContentBlock::new(file, header, level, start_line, end_line, text);
        // fenced code alone normalizes to nothing
        if block.normalized_length == 0 {
            return;
        }
        blocks.push(block);
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self {
            heading: DEFAULT_HEADING.clone(),
            min_section_length: overlap_core::config::DEFAULT_MIN_SECTION_LENGTH,
        }
    }
}
