//! # jsloc
//!
//! A CLI tool for counting source lines of code in JavaScript projects.
//!
//! ## Overview
//!
//! jsloc is built on top of jsloclib. It walks a directory, classifies every
//! `.js` file line by line, and prints raw and code line totals. Files that
//! cannot be classified soundly (for example a possible regular expression
//! followed by a `/*` on the same line) are left out of the totals and listed
//! with the reason and line number.
//!
//! ## Usage
//!
//! ```bash
//! # Count the current directory
//! jsloc
//!
//! # Leave out vendored code by path substring
//! jsloc src -e /thirdparty/ -e /node_modules/
//!
//! # Read exclude substrings from a file, one per line
//! jsloc . --exclude-from .slocignore
//!
//! # Per-file breakdown as JSON
//! jsloc . --by-file --output json
//! ```

mod logging;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use jsloclib::{count_directory, Aggregation, CountOptions, FilterConfig};

use render::OutputMode;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("jsloc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count source lines of code in JavaScript files, excluding blanks and comments")
        .arg(
            Arg::new("path")
                .help("Path to analyze (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files whose path contains this substring"),
        )
        .arg(
            Arg::new("exclude-from")
                .long("exclude-from")
                .value_name("FILE")
                .help("Read exclude substrings from a file, one per line"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude-glob")
                .short('x')
                .long("exclude-glob")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("ext")
                .long("ext")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .help("File extensions to count (default: js)"),
        )
        .arg(
            Arg::new("by-file")
                .short('f')
                .long("by-file")
                .action(ArgAction::SetTrue)
                .help("Show breakdown by file"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_parser(value_parser!(usize))
                .help("Number of worker threads"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("SPEC")
                .help("Log specification, e.g. 'debug' or 'jsloclib=info'"),
        )
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> anyhow::Result<FilterConfig> {
    let mut filter = FilterConfig::new();

    if let Some(exts) = matches.get_many::<String>("ext") {
        filter = filter.extensions(exts);
    }

    if let Some(substrings) = matches.get_many::<String>("exclude") {
        for substring in substrings {
            filter = filter.exclude_substring(substring);
        }
    }

    if let Some(list) = matches.get_one::<String>("exclude-from") {
        filter = filter.exclude_substrings_from_file(list)?;
    }

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude-glob") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

/// Handler for the count run
fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let filter = build_filter(matches)?;
    let extensions = filter.extensions.clone();

    let by_file = matches.get_flag("by-file");
    let aggregation = if by_file {
        Aggregation::ByFile
    } else {
        Aggregation::Total
    };

    let mut options = CountOptions::new().filter(filter).aggregation(aggregation);
    if let Some(&jobs) = matches.get_one::<usize>("jobs") {
        options = options.jobs(jobs);
    }

    let result = count_directory(path, options)
        .with_context(|| format!("counting lines under '{path}'"))?;

    let output_mode = matches
        .get_one::<String>("output")
        .map(|s| OutputMode::parse(s))
        .unwrap_or(OutputMode::Text);

    match output_mode {
        OutputMode::Json => {
            let mut json = render::render_json(&result)?;
            json.push('\n');
            Ok(json)
        }
        OutputMode::Text => {
            let base = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));
            let base = if base.is_file() {
                base.parent().map(PathBuf::from).unwrap_or(base)
            } else {
                base
            };
            let result = canonical_paths(result);
            Ok(render::render_text(&result, &base, &extensions))
        }
    }
}

/// Resolve result paths so they can be shown relative to the canonical base.
fn canonical_paths(mut result: jsloclib::CountResult) -> jsloclib::CountResult {
    let canon = |p: &PathBuf| std::fs::canonicalize(p).unwrap_or_else(|_| p.clone());
    for file in &mut result.files {
        file.path = canon(&file.path);
    }
    for warning in &mut result.warnings {
        warning.path = canon(&warning.path);
    }
    result
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();

    let spec = logging::level_spec(
        matches.get_one::<String>("log-level").map(|s| s.as_str()),
        matches.get_count("verbose"),
    );
    let _logger = match logging::init(&spec) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: invalid log specification '{spec}': {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&matches) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
