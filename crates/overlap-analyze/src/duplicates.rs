//! Exact-duplicate detection by content hash.
//!
//! Same-file duplicates count: a concept pasted twice into one document
//! is a finding too.

use std::collections::{HashMap, HashSet};

use overlap_ingest::ContentBlock;
use tracing::debug;

use crate::types::DuplicateGroup;

/// Group blocks by `content_hash`; every hash with 2+ members is a group.
/// Groups come out in order of their first member.
pub fn find_exact_duplicates(blocks: &[ContentBlock]) -> Vec<DuplicateGroup> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_hash: HashMap<&str, Vec<usize>> = HashMap::new();

    for (idx, block) in blocks.iter().enumerate() {
        if block.content_hash.is_empty() {
            continue;
        }
        let members = by_hash.entry(block.content_hash.as_str()).or_insert_with(|| {
            order.push(block.content_hash.as_str());
            Vec::new()
        });
        members.push(idx);
    }

    let groups: Vec<DuplicateGroup> = order
        .into_iter()
        .filter_map(|hash| {
            let members = by_hash.remove(hash)?;
            (members.len() > 1).then(|| DuplicateGroup {
                hash: hash.to_string(),
                members,
            })
        })
        .collect();

    debug!("Found {} exact duplicate groups", groups.len());
    groups
}

/// Hashes already reported as exact duplicates.
pub fn exact_hashes(groups: &[DuplicateGroup]) -> HashSet<String> {
    groups.iter().map(|g| g.hash.clone()).collect()
}
