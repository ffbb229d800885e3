//! File filtering and discovery.
//!
//! Files are selected by extension, then narrowed by path substrings and
//! glob patterns.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::JslocError;
use crate::Result;

/// Extension counted when none is configured.
pub const DEFAULT_EXTENSION: &str = "js";

/// Configuration for file filtering.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// File extensions to count, lower-case and without the dot (empty = any file)
    pub extensions: Vec<String>,
    /// Glob patterns to include (if empty, include everything)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
    /// Paths containing any of these substrings are excluded
    pub exclude_substrings: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            include: Vec::new(),
            exclude: Vec::new(),
            exclude_substrings: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Create a new filter config (includes all .js files).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set of counted extensions.
    ///
    /// Leading dots are dropped and matching ignores ASCII case.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Exclude paths containing `substring`. Surrounding whitespace is
    /// trimmed and blank entries are ignored.
    pub fn exclude_substring(mut self, substring: &str) -> Self {
        let substring = substring.trim();
        if !substring.is_empty() {
            self.exclude_substrings.push(substring.to_string());
        }
        self
    }

    /// Add exclude substrings from a newline separated list.
    ///
    /// ```rust
    /// use jsloclib::FilterConfig;
    ///
    /// let filter = FilterConfig::new()
    ///     .exclude_substrings_from_text("/thirdparty/\n\n  /node_modules/  \n");
    /// assert_eq!(filter.exclude_substrings, vec!["/thirdparty/", "/node_modules/"]);
    /// ```
    pub fn exclude_substrings_from_text(self, text: &str) -> Self {
        text.lines()
            .fold(self, |filter, line| filter.exclude_substring(line))
    }

    /// Add exclude substrings from a file holding one substring per line.
    pub fn exclude_substrings_from_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| JslocError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(self.exclude_substrings_from_text(&text))
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if:
    /// 1. Its extension is one of the configured extensions
    /// 2. It contains none of the exclude substrings
    /// 3. It doesn't match any exclude pattern
    /// 4. It matches at least one include pattern (or include is empty)
    pub fn matches(&self, path: &Path) -> bool {
        if !self.has_counted_extension(path) {
            return false;
        }

        let path_str = path.to_string_lossy();

        if self
            .exclude_substrings
            .iter()
            .any(|s| path_str.contains(s.as_str()))
        {
            return false;
        }

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }

    fn has_counted_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| JslocError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Check if a directory should be skipped during traversal.
fn should_skip_dir(name: &str) -> bool {
    name.starts_with('.')
}

/// Discover source files under `root`.
///
/// Walks the directory tree and returns every file that matches the filter,
/// sorted. A file root is returned on its own if it matches.
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(JslocError::PathNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    if root.is_file() {
        if filter.matches(root) {
            files.push(root.to_path_buf());
        }
        return Ok(files);
    }

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        // Always include the root directory
        if e.depth() == 0 {
            return true;
        }
        if e.file_type().is_dir() {
            let name = e.file_name().to_str().unwrap_or("");
            return !should_skip_dir(name);
        }
        true
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::debug!("skipping unreadable entry: {e}");
                continue;
            }
        };

        let path = entry.path();

        if path.is_file() && filter.matches(path) {
            files.push(path.to_path_buf());
        }
    }

    // Sort for deterministic output
    files.sort();

    log::info!("discovered {} files under {}", files.len(), root.display());

    Ok(files)
}
