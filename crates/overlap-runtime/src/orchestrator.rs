//! Orchestrator: walks the corpus and runs every analysis stage.

use std::path::Path;
use std::time::Instant;

use overlap_analyze::{
    exact_hashes, find_exact_duplicates, group_variants, ExtractionDetector, SimilaritySearch,
    TermExtractor,
};
use overlap_core::{AnalysisConfig, Error, Result};
use overlap_ingest::{discover_documents, read_document, ContentBlock, Document, SectionExtractor};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::report;
use crate::types::*;

/// Runs the full analysis over one corpus root.
pub struct Analyzer {
    config: AnalysisConfig,
    extractor: SectionExtractor,
}

impl Analyzer {
    /// Validate `config` and prepare the section extractor.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let extractor = SectionExtractor::from_config(&config)?;
        Ok(Self { config, extractor })
    }

    /// Analyze every document under the configured content directories.
    pub fn run(&self, root: &Path) -> Result<Report> {
        if !root.is_dir() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        let started = Instant::now();

        let paths = discover_documents(root, &self.config.content_dirs, &self.config.extensions);
        debug!("Discovered {} candidate documents under {}", paths.len(), root.display());

        let documents = self.read_all(root, &paths);
        let total_lines: usize = documents.iter().map(Document::line_count).sum();

        let blocks: Vec<ContentBlock> = if self.config.parallel {
            documents
                .par_iter()
                .flat_map_iter(|doc| self.extractor.extract(&doc.content, &doc.rel_path))
                .collect()
        } else {
            documents
                .iter()
                .flat_map(|doc| self.extractor.extract(&doc.content, &doc.rel_path))
                .collect()
        };
        info!(
            "Extracted {} content blocks from {} files ({} lines)",
            blocks.len(),
            documents.len(),
            total_lines
        );

        let groups = find_exact_duplicates(&blocks);
        let exact = exact_hashes(&groups);

        let mut search = SimilaritySearch::from_config(&self.config);
        if !self.config.parallel {
            search = search.sequential();
        }
        let similar = search.find(&blocks, &exact);

        let extractions = ExtractionDetector::new(self.config.min_workflow_steps).detect(&blocks);

        let terms = TermExtractor::from_config(&self.config).extract(&blocks);
        let variants = group_variants(&terms, &self.config.synonyms);

        let exact_duplicates: Vec<DuplicateRow> = groups
            .iter()
            .map(|g| report::duplicate_row(&blocks, g, self.config.preview_length))
            .collect();
        let similarity_candidates: Vec<SimilarityRow> = similar
            .iter()
            .map(|c| {
                report::similarity_row(
                    &blocks,
                    c,
                    self.config.similarity_threshold,
                    self.config.exact_cutoff,
                )
            })
            .collect();
        let extraction_candidates: Vec<ExtractionRow> =
            extractions.iter().map(|c| report::extraction_row(&blocks, c)).collect();
        let terminology_variants: Vec<TerminologyRow> =
            variants.iter().map(report::terminology_row).collect();

        let summary = report::summarize(
            &exact_duplicates,
            &similarity_candidates,
            &extraction_candidates,
            &terminology_variants,
        );

        info!(
            "Analysis complete in {}ms: {} exact groups, {} similar pairs, {} extraction candidates, {} terminology issues",
            started.elapsed().as_millis(),
            summary.exact_duplicate_pairs,
            summary.similarity_candidates,
            summary.extraction_candidates,
            summary.terminology_issues
        );

        Ok(Report {
            root: root.display().to_string(),
            root_name: root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            files_analyzed: documents.len(),
            total_lines,
            config: ReportConfig {
                similarity_threshold: self.config.similarity_threshold,
                exact_cutoff: self.config.exact_cutoff,
                length_band: self.config.length_band,
            },
            content_blocks: blocks.iter().map(report::block_row).collect(),
            exact_duplicates,
            similarity_candidates,
            extraction_candidates,
            terminology_variants,
            summary,
        })
    }

    /// Read documents in path order. Unreadable files are logged and dropped.
    fn read_all(&self, root: &Path, paths: &[std::path::PathBuf]) -> Vec<Document> {
        let read = |path: &std::path::PathBuf| match read_document(root, path) {
            Ok(doc) => {
                debug!("Read {} ({} bytes)", doc.rel_path, doc.content.len());
                Some(doc)
            }
            Err(e) => {
                warn!("Skipping file: {}", e);
                None
            }
        };

        if self.config.parallel {
            paths.par_iter().filter_map(read).collect()
        } else {
            paths.iter().filter_map(read).collect()
        }
    }
}

/// Analyze `root` with default settings and the given similarity threshold.
pub fn analyze(root: impl AsRef<Path>, similarity_threshold: f64) -> Result<Report> {
    Analyzer::new(AnalysisConfig::with_threshold(similarity_threshold))?.run(root.as_ref())
}
