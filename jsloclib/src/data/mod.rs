//! Data collection: classify files and collect statistics.
//!
//! This module handles the second stage of the pipeline. It provides:
//!
//! - **Scanning**: the single-pass line classifier (`classify`)
//! - **Statistics**: `LineCounts`, `FileStats`, `Warning`
//! - **Counting**: the driver over many files (`count_directory`, `count_file`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use jsloclib::data::{count_directory, CountOptions};
//!
//! let result = count_directory(".", CountOptions::new())?;
//! println!("Lines of code: {}", result.counts.sloc);
//! ```

pub mod counter;
pub mod scanner;
pub mod stats;

pub use counter::{count_directory, count_file, Aggregation, CountOptions, CountResult};
pub use scanner::{classify, Unsupported, UnsupportedKind};
pub use stats::{FileOutcome, FileStats, LineCounts, Warning};
