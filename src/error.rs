//! Error types for combining project files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while walking, reading or writing.
///
/// Only `RootNotFound`, `NotADirectory` and `Write` end a run. The per-file
/// variants are recorded as outcomes and the walk carries on.
#[derive(Error, Debug)]
pub enum CombineError {
    #[error("Root directory does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Root path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Output must be a plain file name inside the root: {0:?}")]
    InvalidOutputName(String),

    #[error("Error reading file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("File is not valid UTF-8 text: {path}")]
    Decode { path: String },

    #[error("Error walking directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Error writing output file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for combine operations.
pub type Result<T> = std::result::Result<T, CombineError>;
