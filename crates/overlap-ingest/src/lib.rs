//! Overlap Ingest: normalization, heading-delimited section extraction,
//! corpus file discovery.

pub mod file;
pub mod normalize;
pub mod sections;

pub use file::{discover_documents, read_document, Document};
pub use normalize::{content_hash, normalize};
pub use sections::{ContentBlock, SectionExtractor, INTRO_HEADER};
