//! Report shape tests: the JSON consumed by reviewers and by `overlap
//! verify` must keep its field names and types.

use overlap_runtime::analyze;
use serde_json::Value;

fn sample_report() -> Value {
    let dir = tempfile::tempdir().unwrap();
    let refs = dir.path().join("references");
    std::fs::create_dir_all(&refs).unwrap();

    let shared = "Every change goes through review before merge. Reviewers check tests, docs and the changelog entry for the release.";
    std::fs::write(refs.join("a.md"), format!("## Review\n{}\n", shared)).unwrap();
    std::fs::write(
        refs.join("b.md"),
        format!(
            "## Review\n{}\n## Template\nDeploy {{{{SERVICE_NAME}}}} behind the gateway and register the owning team in the shared service catalog.\n",
            shared.to_uppercase()
        ),
    )
    .unwrap();

    let report = analyze(dir.path(), 0.4).unwrap();
    serde_json::to_value(&report).unwrap()
}

/// Top level: { root, root_name, files_analyzed, total_lines, config, ...lists, summary }
#[test]
fn test_report_top_level_shape() {
    let json = sample_report();

    assert!(json["root"].is_string());
    assert!(json["root_name"].is_string());
    assert_eq!(json["files_analyzed"], 2);
    assert!(json["total_lines"].is_number());
    assert_eq!(json["config"]["similarity_threshold"], 0.4);
    assert_eq!(json["config"]["exact_cutoff"], 0.95);
    assert!(json["config"].get("length_band").is_none());
    for list in [
        "content_blocks",
        "exact_duplicates",
        "similarity_candidates",
        "extraction_candidates",
        "terminology_variants",
    ] {
        assert!(json[list].is_array(), "{} is not an array", list);
    }
}

/// content_blocks[]: { id, file, section, level, lines, content_hash, normalized_length }
#[test]
fn test_content_block_shape() {
    let json = sample_report();
    let block = &json["content_blocks"][0];

    assert!(block["id"].is_string());
    assert_eq!(block["file"], "references/a.md");
    assert_eq!(block["section"], "Review");
    assert_eq!(block["level"], 2);
    assert_eq!(block["lines"], "1-3");
    assert_eq!(block["content_hash"].as_str().unwrap().len(), 16);
    assert!(block["normalized_length"].is_number());
    assert!(block.get("text").is_none());
}

/// exact_duplicates[]: { hash, occurrences: [{file, section, lines}], line_count, content_preview, recommendation }
#[test]
fn test_exact_duplicate_shape() {
    let json = sample_report();
    let group = &json["exact_duplicates"][0];

    assert!(group["hash"].is_string());
    assert_eq!(group["occurrences"].as_array().unwrap().len(), 2);
    assert!(group["occurrences"][0]["file"].is_string());
    assert!(group["occurrences"][0]["section"].is_string());
    assert!(group["occurrences"][0]["lines"].is_string());
    assert!(group["line_count"].is_number());
    assert!(group["content_preview"].as_str().unwrap().ends_with("..."));
    assert_eq!(group["recommendation"], "consolidate");
}

/// extraction_candidates[]: { type, pattern, file, section, lines, evidence, recommendation }
#[test]
fn test_extraction_candidate_shape() {
    let json = sample_report();
    let row = &json["extraction_candidates"][0];

    assert_eq!(row["type"], "template");
    assert_eq!(row["pattern"], "placeholder_structure");
    assert_eq!(row["section"], "Template");
    assert_eq!(row["evidence"]["placeholders"][0], "{{SERVICE_NAME}}");
    assert!(row["evidence"].get("step_count").is_none());
    assert_eq!(row["recommendation"], "extract_to_templates");
}

/// summary: { exact_duplicate_pairs, similarity_candidates, extraction_candidates, terminology_issues, manual_review_required }
#[test]
fn test_summary_shape() {
    let json = sample_report();
    let summary = &json["summary"];

    assert_eq!(summary["exact_duplicate_pairs"], 1);
    assert!(summary["similarity_candidates"].is_number());
    assert_eq!(summary["extraction_candidates"], 1);
    assert!(summary["terminology_issues"].is_number());
    assert_eq!(summary["manual_review_required"], true);
}

/// The serialized report reads back into the typed report.
#[test]
fn test_report_reads_back() {
    let json = sample_report();
    let report: overlap_runtime::Report = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(serde_json::to_value(&report).unwrap(), json);
}
