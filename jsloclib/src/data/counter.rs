//! High-level counting API.
//!
//! This module drives the scanner over many files: discovery, a bounded
//! worker pool, and the fold of per-file outcomes into one [`CountResult`].
//! A file the scanner rejects is recorded as a [`Warning`] and the run goes on.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use crate::error::JslocError;
use crate::source::filter::{discover_files, FilterConfig};
use crate::Result;

use super::scanner::classify;
use super::stats::{FileOutcome, FileStats, LineCounts, Warning};

/// How much detail to keep in a [`CountResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Aggregation {
    /// Totals and warnings only
    #[default]
    Total,
    /// Totals, warnings and per-file statistics
    ByFile,
}

/// Options for counting.
#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    /// File filter configuration
    pub file_filter: FilterConfig,
    /// Aggregation level for results
    pub aggregation: Aggregation,
    /// Worker threads (None = rayon's default)
    pub jobs: Option<usize>,
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Set aggregation level.
    pub fn aggregation(mut self, level: Aggregation) -> Self {
        self.aggregation = level;
        self
    }

    /// Limit the number of worker threads.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs.max(1));
        self
    }
}

/// Result of counting a directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CountResult {
    /// Number of files counted (skipped files excluded)
    pub file_count: usize,
    /// Bytes in counted files
    pub bytes: u64,
    /// Aggregated line counts across counted files
    pub counts: LineCounts,
    /// Per-file statistics (ByFile only)
    pub files: Vec<FileStats>,
    /// Files left out of the totals
    pub warnings: Vec<Warning>,
}

impl CountResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the counted files in KB, rounded.
    pub fn kilobytes(&self) -> u64 {
        (self.bytes + 512) / 1024
    }

    fn add_outcome(&mut self, outcome: FileOutcome, keep_files: bool) {
        match outcome {
            FileOutcome::Counted(stats) => {
                self.file_count += 1;
                self.bytes += stats.bytes;
                self.counts += stats.counts;
                if keep_files {
                    self.files.push(stats);
                }
            }
            FileOutcome::Skipped(warning) => self.warnings.push(warning),
        }
    }
}

/// Count lines in every matching file under `path`.
///
/// Files are classified in parallel. Outcomes are folded in discovery order,
/// so the result does not depend on scheduling.
///
/// # Example
///
/// ```rust
/// use jsloclib::{count_directory, CountOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("a.js"), "foo();\n// note\nbar();\n").unwrap();
/// fs::write(dir.path().join("b.js"), "x = 'open;\n").unwrap();
///
/// let result = count_directory(dir.path(), CountOptions::new()).unwrap();
/// assert_eq!(result.file_count, 1);
/// assert_eq!(result.counts.sloc, 2);
/// assert_eq!(result.warnings.len(), 1);
/// assert_eq!(result.warnings[0].line, Some(1));
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: CountOptions) -> Result<CountResult> {
    let files = discover_files(path, &options.file_filter)?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = options.jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder
        .build()
        .map_err(|e| JslocError::ThreadPool(e.to_string()))?;

    let outcomes: Vec<FileOutcome> =
        pool.install(|| files.par_iter().map(count_file).collect());

    let keep_files = matches!(options.aggregation, Aggregation::ByFile);
    let mut result = CountResult::new();
    for outcome in outcomes {
        result.add_outcome(outcome, keep_files);
    }

    log::info!(
        "counted {} files ({} sloc of {} lines), skipped {}",
        result.file_count,
        result.counts.sloc,
        result.counts.total,
        result.warnings.len()
    );

    Ok(result)
}

/// Count lines in a single file.
///
/// A file that cannot be read, or that the scanner cannot classify, is
/// returned as [`FileOutcome::Skipped`] rather than as an error so that a
/// batch can still produce a partial count.
///
/// # Example
///
/// ```rust
/// use jsloclib::{count_file, FileOutcome};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let file_path = dir.path().join("main.js");
/// fs::write(&file_path, "function main() {\n    /* todo */\n}\n").unwrap();
///
/// match count_file(&file_path) {
///     FileOutcome::Counted(stats) => assert_eq!(stats.counts.sloc, 2),
///     FileOutcome::Skipped(w) => panic!("skipped: {}", w.reason),
/// }
/// ```
pub fn count_file(path: impl AsRef<Path>) -> FileOutcome {
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::info!("skipping {}: unable to read file: {e}", path.display());
            return FileOutcome::Skipped(Warning::new(
                path.to_path_buf(),
                format!("unable to read file: {e}"),
                None,
            ));
        }
    };
    let text = String::from_utf8_lossy(&bytes).replace("\r\n", "\n");

    match classify(&text) {
        Ok(counts) => {
            log::debug!(
                "{}: {} lines, {} sloc",
                path.display(),
                counts.total,
                counts.sloc
            );
            FileOutcome::Counted(FileStats::new(
                path.to_path_buf(),
                bytes.len() as u64,
                counts,
            ))
        }
        Err(unsupported) => {
            log::info!("skipping {}: {unsupported}", path.display());
            FileOutcome::Skipped(Warning::new(
                path.to_path_buf(),
                unsupported.message(),
                Some(unsupported.display_line()),
            ))
        }
    }
}
