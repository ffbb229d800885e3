//! Logger setup for the CLI.

use flexi_logger::{DeferredNow, FlexiLoggerError, Logger, LoggerHandle};
use log::Record;

/// Default level when neither `--log-level` nor `-v` is given.
const DEFAULT_LEVEL: &str = "warn";

/// Pick the log spec from `--log-level` or the `-v` count.
pub fn level_spec(explicit: Option<&str>, verbosity: u8) -> String {
    if let Some(spec) = explicit {
        return spec.to_string();
    }
    match verbosity {
        0 => DEFAULT_LEVEL,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
    .to_string()
}

/// Start logging to stderr. Keep the handle alive until exit.
pub fn init(spec: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(spec)?
        .log_to_stderr()
        .format(plain_format)
        .start()
}

fn plain_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let level = match record.level() {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    };
    write!(w, "{} {}", level, record.args())
}
