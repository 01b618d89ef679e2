//! Overlap Runtime: walks a corpus, runs every analysis stage, assembles
//! the report.

pub mod orchestrator;
pub mod report;
pub mod types;

pub use orchestrator::{analyze, Analyzer};
pub use types::*;
