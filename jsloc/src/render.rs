//! Report rendering for CLI output

use std::path::Path;

use console::Style;
use jsloclib::{CountResult, FileStats, Warning};

/// Width of the name column in the per-file table
const NAME_WIDTH: usize = 60;
/// Width of each numeric column
const CELL_WIDTH: usize = 10;

/// Output format selected with `--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len {
        let tail: String = name.chars().skip(len - max_len + 2).collect();
        format!("..{tail}")
    } else {
        name.to_string()
    }
}

/// Convert a path to a relative path from the base directory.
fn make_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string())
}

/// Describe the counted extensions, e.g. `.js` or `.js/.mjs`.
fn extension_label(extensions: &[String]) -> String {
    if extensions.is_empty() {
        return "source".to_string();
    }
    extensions
        .iter()
        .map(|e| format!(".{e}"))
        .collect::<Vec<_>>()
        .join("/")
}

fn file_table(files: &[FileStats], base: &Path) -> String {
    let header = Style::new().bold();
    let mut out = String::new();

    let title = format!(
        "{:<name$} {:>cell$} {:>cell$} {:>cell$}",
        "File",
        "Lines",
        "SLOC",
        "Other",
        name = NAME_WIDTH,
        cell = CELL_WIDTH
    );
    out.push_str(&format!("{}\n", header.apply_to(title)));
    out.push_str(&"-".repeat(NAME_WIDTH + (CELL_WIDTH + 1) * 3));
    out.push('\n');

    for file in files {
        let name = truncate_name(&make_relative(&file.path, base), NAME_WIDTH - 2);
        out.push_str(&format!(
            "{:<name$} {:>cell$} {:>cell$} {:>cell$}\n",
            name,
            file.counts.total,
            file.counts.sloc,
            file.counts.non_code(),
            name = NAME_WIDTH,
            cell = CELL_WIDTH
        ));
    }
    out.push('\n');
    out
}

fn warning_line(warning: &Warning, base: &Path) -> String {
    let path = make_relative(&warning.path, base);
    match warning.line {
        Some(line) => format!("Ignored '{}': {} at line {}", path, warning.reason, line),
        None => format!("Ignored '{}': {}", path, warning.reason),
    }
}

/// Render the human readable report.
pub fn render_text(result: &CountResult, base: &Path, extensions: &[String]) -> String {
    let emphasis = Style::new().bold();
    let caution = Style::new().yellow();
    let mut out = String::new();

    if !result.files.is_empty() {
        out.push_str(&file_table(&result.files, base));
    }

    out.push_str(&format!(
        "Scanned {} {} files ({} KB).\n",
        result.file_count,
        extension_label(extensions),
        result.kilobytes()
    ));
    out.push_str(&format!("Raw total lines: {}\n", result.counts.total));
    out.push_str(&format!(
        "{}  (excluding whitespace & comments)\n",
        emphasis.apply_to(format!("Lines of code: {}", result.counts.sloc))
    ));

    if !result.warnings.is_empty() {
        out.push('\n');
        for warning in &result.warnings {
            out.push_str(&format!("{}\n", caution.apply_to(warning_line(warning, base))));
        }
    }

    out
}

/// Render the result as pretty JSON.
pub fn render_json(result: &CountResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
