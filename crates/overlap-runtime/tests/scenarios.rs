//! End-to-end analysis over small on-disk corpora.

use std::path::Path;

use overlap_analyze::ExtractionKind;
use overlap_core::{AnalysisConfig, Error};
use overlap_runtime::{analyze, Analyzer, Report};
use tempfile::TempDir;

const REVIEW_A: &str = "Before opening a pull request run the full verification suite locally. \
Make sure formatting passes and that the changelog entry describes the user facing change in one sentence.";
const REVIEW_B: &str = "Before opening a pull request run the full verification suite locally. \
Confirm linting is clean and that the release entry describes the visible change in two short lines.";

fn corpus(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (rel, content) in files {
        write(dir.path(), rel, content.as_bytes());
    }
    dir
}

fn write(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

fn run(dir: &TempDir) -> Report {
    analyze(dir.path(), 0.4).unwrap()
}

#[test]
fn test_whitespace_and_case_variants_are_exact_duplicates() {
    let dir = corpus(&[
        (
            "references/a.md",
            "## Release Notes\nThe release train leaves every Tuesday. Tag the build, publish artifacts and update the changelog before announcing.\n",
        ),
        (
            "workflows/b.md",
            "## Release Notes\nthe release   train leaves every TUESDAY.\nTag the build,  publish artifacts and update the changelog before announcing.\n\n",
        ),
    ]);
    let report = run(&dir);

    assert_eq!(report.files_analyzed, 2);
    assert_eq!(report.exact_duplicates.len(), 1);
    let group = &report.exact_duplicates[0];
    assert_eq!(group.occurrences.len(), 2);
    assert_eq!(group.occurrences[0].file, "references/a.md");
    assert_eq!(group.occurrences[1].file, "workflows/b.md");
    assert_eq!(group.recommendation, "consolidate");
    assert!(group.content_preview.starts_with("the release train leaves every tuesday."));
    assert!(group.content_preview.ends_with("..."));
    assert!(report.similarity_candidates.is_empty());
    assert_eq!(report.summary.exact_duplicate_pairs, 1);
}

#[test]
fn test_bolded_word_is_still_exact_after_normalization() {
    let dir = corpus(&[
        (
            "references/a.md",
            "## Shared\nEvery service exposes a health endpoint that returns the build version and the current uptime in seconds.\n",
        ),
        (
            "references/b.md",
            "## Shared\nEvery service exposes a **health** endpoint that returns the build version and the current uptime in seconds.\n",
        ),
    ]);
    let report = run(&dir);
    assert_eq!(report.exact_duplicates.len(), 1);
}

#[test]
fn test_near_duplicates_across_files() {
    let dir = corpus(&[
        ("references/a.md", &format!("## Review Checklist\n{}\n", REVIEW_A)),
        ("workflows/b.md", &format!("## Submitting Changes\n{}\n", REVIEW_B)),
    ]);
    let report = run(&dir);

    assert!(report.exact_duplicates.is_empty());
    assert_eq!(report.similarity_candidates.len(), 1);
    let pair = &report.similarity_candidates[0];
    assert!(pair.similarity >= 0.4 && pair.similarity < 0.95, "got {}", pair.similarity);
    assert_eq!(pair.source.file, "references/a.md");
    assert_eq!(pair.target.file, "workflows/b.md");
    assert!(pair.review_required);
    assert!(report.summary.manual_review_required);
}

#[test]
fn test_threshold_above_score_reports_nothing() {
    let dir = corpus(&[
        ("references/a.md", &format!("## Review Checklist\n{}\n", REVIEW_A)),
        ("workflows/b.md", &format!("## Submitting Changes\n{}\n", REVIEW_B)),
    ]);
    let report = analyze(dir.path(), 0.9).unwrap();
    assert!(report.similarity_candidates.is_empty());
}

#[test]
fn test_same_file_pairs_are_not_similarity_candidates() {
    let dir = corpus(&[(
        "references/a.md",
        &format!(
            "## Review Checklist\n{}\n## Submitting Changes\n{}\n## Again\n{}\n",
            REVIEW_A, REVIEW_B, REVIEW_A
        ),
    )]);
    let report = run(&dir);

    assert!(report.similarity_candidates.is_empty());
    // same-file exact duplicates are still findings
    assert_eq!(report.exact_duplicates.len(), 1);
    assert_eq!(report.exact_duplicates[0].occurrences.len(), 2);
}

#[test]
fn test_step_lines_make_a_workflow_candidate() {
    let dir = corpus(&[(
        "workflows/deploy.md",
        "## Deployment\n\
Follow these in order when shipping a new build to production.\n\
Step 1: Build the release artifacts from the tagged commit.\n\
Step 2: Upload the artifacts to the staging bucket.\n\
Step 3: Promote staging to production after smoke tests pass.\n",
    )]);
    let report = run(&dir);

    assert_eq!(report.extraction_candidates.len(), 1);
    let row = &report.extraction_candidates[0];
    assert_eq!(row.kind, ExtractionKind::Workflow);
    assert_eq!(row.pattern, "step_sequence");
    assert_eq!(row.evidence.step_count, Some(3));
    assert_eq!(row.recommendation, "extract_to_workflows");
}

#[test]
fn test_placeholder_makes_a_template_candidate() {
    let dir = corpus(&[(
        "templates/service.md",
        "## Service Readme\n\
Deploy {{SERVICE_NAME}} to the shared cluster and register it with the gateway before the first release.\n",
    )]);
    let report = run(&dir);

    assert_eq!(report.extraction_candidates.len(), 1);
    let row = &report.extraction_candidates[0];
    assert_eq!(row.kind, ExtractionKind::Template);
    assert_eq!(row.evidence.placeholders, Some(vec!["{{SERVICE_NAME}}".to_string()]));
    assert_eq!(row.file, "templates/service.md");
    assert_eq!(row.section, "Service Readme");
}

#[test]
fn test_terminology_variants_pick_most_frequent_term() {
    let dir = corpus(&[
        (
            "references/a.md",
            "## Linking Rules\nUse `xref` when pointing at another page. Each `xref` keeps the docs navigable, \
and every `xref` is checked by the link linter.\n",
        ),
        (
            "references/b.md",
            "## Page Links\nA `cross-reference` points the reader somewhere else in the docs. \
Keep each `cross-reference` short and descriptive.\n",
        ),
    ]);
    let report = run(&dir);

    assert_eq!(report.terminology_variants.len(), 1);
    let row = &report.terminology_variants[0];
    assert_eq!(row.concept, "cross-reference");
    assert_eq!(row.variants.len(), 2);
    assert_eq!(row.variants[0].term, "xref");
    assert_eq!(row.variants[0].count, 3);
    assert_eq!(row.variants[0].files, vec!["references/a.md"]);
    assert_eq!(row.variants[1].term, "cross-reference");
    assert_eq!(row.variants[1].count, 2);
    assert_eq!(row.canonical, "xref");
    assert_eq!(row.recommendation, "standardize on 'xref'");
}

#[test]
fn test_empty_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let report = run(&dir);

    assert_eq!(report.files_analyzed, 0);
    assert_eq!(report.total_lines, 0);
    assert!(report.content_blocks.is_empty());
    assert!(report.exact_duplicates.is_empty());
    assert!(report.similarity_candidates.is_empty());
    assert!(report.extraction_candidates.is_empty());
    assert!(report.terminology_variants.is_empty());
    assert!(!report.summary.manual_review_required);
}

#[test]
fn test_unreadable_file_is_skipped() {
    let dir = corpus(&[(
        "references/good.md",
        "## Notes\nThis paragraph is long enough to be kept as a content block by the section extractor on every single run.\n",
    )]);
    write(dir.path(), "references/bad.md", &[0xff, 0xfe, 0x00, 0xc3, 0x28]);

    let report = run(&dir);
    assert_eq!(report.files_analyzed, 1);
    assert!(report.content_blocks.iter().all(|b| b.file == "references/good.md"));
}

#[test]
fn test_files_outside_content_dirs_ignored() {
    let dir = corpus(&[
        ("notes/a.md", &format!("## Review Checklist\n{}\n", REVIEW_A)),
        ("references/a.txt", &format!("## Review Checklist\n{}\n", REVIEW_A)),
    ]);
    assert_eq!(run(&dir).files_analyzed, 0);
}

#[test]
fn test_report_metadata() {
    let dir = corpus(&[(
        "references/guide.md",
        "Intro text that is long enough to survive the minimum section length floor applied by the extractor.\n## Short\ntoo short\n",
    )]);
    let report = run(&dir);

    assert_eq!(report.total_lines, 4);
    assert_eq!(report.config.similarity_threshold, 0.4);
    assert_eq!(report.config.exact_cutoff, 0.95);
    assert_eq!(
        report.root_name,
        dir.path().file_name().unwrap().to_string_lossy()
    );
    assert_eq!(report.content_blocks.len(), 1);
    let block = &report.content_blocks[0];
    assert_eq!(block.section, "_intro");
    assert_eq!(block.level, 0);
    assert_eq!(block.lines, "1-1");
    assert_eq!(block.id, "references:guide.md:_intro");
    assert_eq!(block.content_hash.len(), 16);
}

#[test]
fn test_invalid_threshold() {
    let dir = tempfile::tempdir().unwrap();
    for bad in [-0.1, 1.0, 2.0] {
        let err = analyze(dir.path(), bad).unwrap_err();
        assert!(matches!(err, Error::InvalidThreshold { .. }), "{} accepted", bad);
    }
}

#[test]
fn test_path_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = analyze(dir.path().join("missing"), 0.4).unwrap_err();
    assert!(matches!(err, Error::PathNotFound(_)));
}

#[test]
fn test_custom_config_content_dirs_and_cutoff() {
    let dir = corpus(&[
        ("docs/a.md", &format!("## Review Checklist\n{}\n", REVIEW_A)),
        ("docs/b.md", &format!("## Submitting Changes\n{}\n", REVIEW_B)),
    ]);
    let config = AnalysisConfig {
        content_dirs: vec!["docs".to_string()],
        exact_cutoff: 0.5,
        similarity_threshold: 0.1,
        ..AnalysisConfig::default()
    };
    let report = Analyzer::new(config).unwrap().run(dir.path()).unwrap();
    assert_eq!(report.files_analyzed, 2);
    // score lies above the lowered cutoff
    assert!(report.similarity_candidates.is_empty());
    assert_eq!(report.config.exact_cutoff, 0.5);
}

#[test]
fn test_threshold_at_or_above_cutoff_gives_empty_band() {
    let dir = corpus(&[
        ("references/a.md", &format!("## Review Checklist\n{}\n", REVIEW_A)),
        ("workflows/b.md", &format!("## Submitting Changes\n{}\n", REVIEW_B)),
    ]);
    for threshold in [0.95, 0.96, 0.97] {
        let report = analyze(dir.path(), threshold).unwrap();
        assert!(report.similarity_candidates.is_empty(), "threshold {}", threshold);
        assert_eq!(report.config.similarity_threshold, threshold);
    }
}

#[test]
fn test_code_only_sections_are_not_duplicates() {
    let dir = corpus(&[
        (
            "references/a.md",
            "## Build\n```bash\ncargo build --release --workspace\ncargo test --workspace --all-features\ncargo clippy -- -D warnings\n```\n",
        ),
        (
            "references/b.md",
            "## Deploy\n```bash\nkubectl apply -f deploy/production.yaml\nkubectl rollout status deployment/api\nkubectl get pods -n api\n```\n",
        ),
    ]);
    let report = run(&dir);

    assert_eq!(report.files_analyzed, 2);
    assert!(report.content_blocks.is_empty());
    assert!(report.exact_duplicates.is_empty());
    assert!(report.similarity_candidates.is_empty());
}
