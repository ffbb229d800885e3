//! # jsloclib
//!
//! A source-lines-of-code counter for JavaScript-like text that never guesses
//! when a guess could be wrong.
//!
//! ## Overview
//!
//! Each line of a file is classified as code or as blank/comment in a single
//! forward scan. The scanner follows `//` and `/* */` comments, `'` and `"`
//! strings (including strings continued with a trailing backslash), and
//! nothing more. It does not parse regular expression literals. When a `/`
//! might start one and the rest of the line could change how later lines are
//! read, the file is reported as [`Unsupported`] instead of being miscounted.
//!
//! ## Features
//!
//! - **Fail-closed scanning**: ambiguous files are skipped with a located reason
//! - **Partial counts**: a skipped file never aborts a directory run
//! - **Filtering**: by extension, path substring, and glob pattern
//! - **Parallel**: files are classified on a bounded worker pool
//!
//! ## Example
//!
//! ```rust
//! use jsloclib::{classify, count_directory, CountOptions, FilterConfig};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // Classify text directly
//! let counts = classify("var a = 1;\n\n// comment\nvar b = 2;\n").unwrap();
//! assert_eq!((counts.total, counts.sloc), (5, 2));
//!
//! // Count a directory
//! let dir = tempdir().unwrap();
//! fs::create_dir(dir.path().join("vendor")).unwrap();
//! fs::write(dir.path().join("app.js"), "start();\n").unwrap();
//! fs::write(dir.path().join("vendor/lib.js"), "lib();\n").unwrap();
//!
//! let filter = FilterConfig::new().exclude_substring("vendor");
//! let result = count_directory(dir.path(), CountOptions::new().filter(filter)).unwrap();
//! assert_eq!(result.file_count, 1);
//! assert_eq!(result.counts.sloc, 1);
//! ```

pub mod data;
pub mod error;
pub mod source;

pub use data::{
    classify, count_directory, count_file, Aggregation, CountOptions, CountResult, FileOutcome,
    FileStats, LineCounts, Unsupported, UnsupportedKind, Warning,
};
pub use error::JslocError;
pub use source::{discover_files, FilterConfig};

/// Result type for jsloclib operations
pub type Result<T> = std::result::Result<T, JslocError>;
