//! Error types for jsloclib
//!
//! These are the fatal errors of a counting run. A file the scanner cannot
//! classify is not an error at this level: it surfaces as
//! [`Unsupported`](crate::data::scanner::Unsupported) and then as a per-file
//! [`Warning`](crate::data::stats::Warning).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a counting run
#[derive(Error, Debug)]
pub enum JslocError {
    /// Failed to read a file that the run cannot do without
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// The worker pool could not be started
    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),
}
