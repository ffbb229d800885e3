//! Core data structures for line statistics.
//!
//! A file either produces a [`LineCounts`] pair or is skipped with a
//! [`Warning`]. Only counted files contribute to totals.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

/// Raw and code line counts.
///
/// - `total`: every line segment, blank and comment lines included
/// - `sloc`: lines holding at least one character of code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    /// All lines
    pub total: u64,
    /// Source lines of code
    pub sloc: u64,
}

impl LineCounts {
    /// Create a new LineCounts with all zeros.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that are blank or only comment.
    pub fn non_code(&self) -> u64 {
        self.total - self.sloc
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            sloc: self.sloc + other.sloc,
        }
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.sloc += other.sloc;
    }
}

/// Statistics for a single counted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// Path to the file
    pub path: PathBuf,
    /// Size of the file in bytes
    pub bytes: u64,
    /// Line counts for this file
    pub counts: LineCounts,
}

impl FileStats {
    pub fn new(path: PathBuf, bytes: u64, counts: LineCounts) -> Self {
        Self {
            path,
            bytes,
            counts,
        }
    }
}

/// A file left out of the totals, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Path to the file
    pub path: PathBuf,
    /// Human readable reason
    pub reason: String,
    /// 1-based line the problem was found on, if it is tied to one
    pub line: Option<usize>,
}

impl Warning {
    pub fn new(path: PathBuf, reason: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            path,
            reason: reason.into(),
            line,
        }
    }
}

/// Result of counting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Counted(FileStats),
    Skipped(Warning),
}
