//! Corpus file discovery and reading.

use std::path::{Component, Path, PathBuf};

use overlap_core::{Error, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A document read from the corpus.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path relative to the analysis root, `/`-separated.
    pub rel_path: String,
    pub content: String,
}

impl Document {
    /// Line count with `split('\n')` semantics (a trailing newline adds an
    /// empty last line).
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}

/// Check whether a path carries one of the document extensions.
pub fn is_document(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Walk `content_dirs` under `root` and collect document paths, sorted by
/// their `/`-separated relative path string.
///
/// Missing content directories are skipped. Walk errors (permissions,
/// broken links) are logged and skipped.
pub fn discover_documents(root: &Path, content_dirs: &[String], extensions: &[String]) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for dir in content_dirs {
        let dir_path = root.join(dir);
        if !dir_path.is_dir() {
            debug!("Content directory absent: {}", dir_path.display());
            continue;
        }

        for entry in WalkDir::new(&dir_path).follow_links(false) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unwalkable entry under {}: {}", dir_path.display(), e);
                    continue;
                }
            };
            if entry.file_type().is_file() && is_document(entry.path(), extensions) {
                found.push(entry.into_path());
            }
        }
    }

    found.sort_by_cached_key(|p| relative_path(root, p));
    found.dedup();
    found
}

/// Read one document. Failures (missing file, invalid UTF-8) surface as
/// `Error::FileUnreadable` so callers can skip the file.
pub fn read_document(root: &Path, path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Document {
        rel_path: relative_path(root, path),
        content,
    })
}

/// Render `path` relative to `root` with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
