//! Overlap Core: error taxonomy, analysis configuration, synonym table.

pub mod config;
pub mod error;
pub mod synonyms;

pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use synonyms::{SynonymGroup, SynonymTable};
