//! Error types for Overlap.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Root path is missing or is not a directory. Fatal.
    #[error("Path not found or not a directory: {0}")]
    PathNotFound(PathBuf),

    /// Threshold outside its allowed range. Fatal, raised before any scanning.
    #[error("Invalid threshold: {name}={value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// A single document could not be read. Callers skip the file.
    #[error("File unreadable: {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
