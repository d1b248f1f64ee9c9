//! Console logger behind the `log` facade.
//!
//! Debug records go to stdout prefixed with `[DEBUG]` so they interleave
//! with the output of executed commands; warnings and errors go to stderr.

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct ConsoleLogger {
    filter: LevelFilter,
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record.level(), &record.args().to_string());
        match record.level() {
            Level::Error | Level::Warn => {
                let _ = writeln!(std::io::stderr().lock(), "{line}");
            }
            Level::Info | Level::Debug | Level::Trace => {
                let _ = writeln!(std::io::stdout().lock(), "{line}");
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// Level filter for an invocation.
///
/// `--debug` wins; otherwise `RUST_LOG` is honoured, defaulting to warnings.
pub fn level_filter(debug: bool) -> LevelFilter {
    if debug {
        return LevelFilter::Debug;
    }
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Initialize the global logger. Call once, before any logging.
pub fn init(debug: bool) -> Result<(), SetLoggerError> {
    let filter = level_filter(debug);
    log::set_boxed_logger(Box::new(ConsoleLogger { filter }))?;
    log::set_max_level(filter);
    Ok(())
}

fn format_line(level: Level, message: &str) -> String {
    match level {
        Level::Info => message.to_string(),
        Level::Trace => format!("[DEBUG] {message}"),
        other => format!("[{other}] {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_enables_debug_level() {
        assert_eq!(level_filter(true), LevelFilter::Debug);
    }

    #[test]
    fn lines_are_prefixed_by_level() {
        assert_eq!(
            format_line(Level::Debug, "running: ls"),
            "[DEBUG] running: ls"
        );
        assert_eq!(format_line(Level::Trace, "x"), "[DEBUG] x");
        assert_eq!(format_line(Level::Warn, "careful"), "[WARN] careful");
        assert_eq!(format_line(Level::Error, "broken"), "[ERROR] broken");
        assert_eq!(format_line(Level::Info, "plain"), "plain");
    }
}
