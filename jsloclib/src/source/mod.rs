//! Source discovery: find files to analyze.
//!
//! This module handles the first stage of the pipeline - deciding which
//! files to count with extension, substring and glob filters.
//!
//! ## Example
//!
//! ```rust,ignore
//! use jsloclib::source::FilterConfig;
//!
//! let filter = FilterConfig::new()
//!     .exclude_substring("/node_modules/")
//!     .exclude("**/*.min.js")?;
//! ```

pub mod filter;

pub use filter::{discover_files, FilterConfig, DEFAULT_EXTENSION};
