//! Cross-file content analysis over extracted content blocks.
//!
//! Every stage takes the block arena (`&[ContentBlock]`) and refers to
//! blocks by index. Nothing here mutates a block.

pub mod duplicates;
pub mod extraction;
pub mod matcher;
pub mod similarity;
pub mod terminology;
pub mod types;

pub use duplicates::{exact_hashes, find_exact_duplicates};
pub use extraction::{detect_extraction_candidates, ExtractionDetector};
pub use similarity::{block_similarity, find_similar_pairs, similarity, SimilaritySearch};
pub use terminology::{group_variants, TermExtractor};
pub use types::*;
