//! Text canonicalization and content hashing.
//!
//! `normalize` strips formatting so that two fragments differing only in
//! markup, case or whitespace compare equal. It is idempotent:
//! URL matching is case-insensitive (lowercasing cannot expose a new URL)
//! and stray backticks are dropped with the other markup characters
//! (no new code span can form on a second pass).

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

static FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]+`").unwrap());
static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[#*_\[\]()`]").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://\S+").unwrap());

/// Bytes of the SHA-256 digest kept in a content hash (64 bits).
///
/// Accidental collisions follow the birthday bound: roughly n²/2⁶⁵ for n
/// blocks, about 5e-12 at ten thousand blocks.
pub const HASH_BYTES: usize = 8;

/// Canonicalize text for comparison.
///
/// Steps: fenced code blocks, inline code spans, markup characters, URLs,
/// whitespace collapse, lowercase.
pub fn normalize(text: &str) -> String {
    let text = FENCED_CODE.replace_all(text, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = MARKUP.replace_all(&text, "");
    let text = URL.replace_all(&text, "");
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Remove fenced code blocks only, leaving everything else intact.
pub fn strip_fenced_code(text: &str) -> String {
    FENCED_CODE.replace_all(text, "").into_owned()
}

/// Hash of already-normalized text: truncated SHA-256, hex encoded.
pub fn hash_normalized(normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..HASH_BYTES])
}

/// Compute the content hash of raw text (`hash(normalize(text))`).
pub fn content_hash(text: &str) -> String {
    hash_normalized(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_code_and_markup() {
        let text = "## Title\n\nUse **bold** and `inline` here.\n\n```rust\nfn main() {}\n```\nDone.";
        assert_eq!(normalize(text), "title use bold and here. done.");
    }

    #[test]
    fn test_strips_urls() {
        let text = "See [the docs](https://example.com/a/b) for more.";
        assert_eq!(normalize(text), "see the docs for more.");
        assert_eq!(normalize("Visit HTTP://EXAMPLE.COM now"), "visit now");
    }

    #[test]
    fn test_whitespace_and_case() {
        assert_eq!(normalize("  Hello\n\n\tWORLD  "), "hello world");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_stray_backtick_removed() {
        assert_eq!(normalize("a ` b"), "a b");
        assert_eq!(normalize(&normalize("```x")), normalize("```x"));
    }

    #[test]
    fn test_hash_is_truncated_hex() {
        let h = content_hash("Some text");
        assert_eq!(h.len(), HASH_BYTES * 2);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_ignores_formatting() {
        assert_eq!(
            content_hash("The *Quick*   brown fox"),
            content_hash("the quick brown\nfox")
        );
        assert_ne!(content_hash("the quick fox"), content_hash("the slow fox"));
    }
}
