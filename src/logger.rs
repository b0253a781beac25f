//! Console logger and process-wide logging entry points.
//!
//! A [`Logger`] owns one [`TerminalSink`] behind a mutex. Every call holds the
//! lock from the first prefix segment to the end of the line, so lines from
//! concurrent threads never interleave and each line starts from a known
//! color state.
//!
//! The global logger is created on first use from the config file and the
//! `TILDELOG_LEVEL` / `TILDELOG_COLOR` environment variables, unless
//! [`init`] or [`init_with`] installed one earlier.

use crate::error::InitError;
use crate::level::Level;
use crate::line;
use crate::sink::{self, TerminalSink};
use chrono::Local;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tildelog_config::Config;

/// Thread-safe console logger.
pub struct Logger {
    sink: Mutex<Box<dyn TerminalSink>>,
    filter: RwLock<log::LevelFilter>,
    /// Set once this logger backs the `log` crate; filter changes are mirrored.
    bridged: AtomicBool,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("filter", &*self.filter.read())
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a logger writing to `sink` and printing levels allowed by `filter`.
    pub fn new(sink: Box<dyn TerminalSink>, filter: log::LevelFilter) -> Self {
        Self {
            sink: Mutex::new(sink),
            filter: RwLock::new(filter),
            bridged: AtomicBool::new(false),
        }
    }

    /// Create a console logger for the given configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            sink::console(config.color, config.stream),
            config.level.to_level_filter(),
        )
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        *self.filter.read()
    }

    /// Change the level threshold at runtime.
    pub fn set_level_filter(&self, filter: log::LevelFilter) {
        *self.filter.write() = filter;
        if self.bridged.load(Ordering::Acquire) {
            log::set_max_level(filter);
        }
    }

    /// Check if a level is printed by this logger
    pub fn is_enabled(&self, level: Level) -> bool {
        level.is_enabled_by(self.level_filter())
    }

    /// Print one line.
    ///
    /// Output errors are ignored: a closed or redirected stream must never
    /// take the caller down.
    pub fn log(&self, level: Level, source: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let mut sink = self.sink.lock();
        let segments = line::format_line(level, source, message, Local::now().time());
        let _ = line::render(&segments, &mut **sink);
    }

    /// Print a formatted line; arguments are only formatted if the level is enabled.
    pub fn logf(&self, level: Level, source: &str, args: fmt::Arguments) {
        if !self.is_enabled(level) {
            return;
        }
        match args.as_str() {
            Some(message) => self.log(level, source, message),
            None => self.log(level, source, &args.to_string()),
        }
    }

    pub fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.is_enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        // The record target (usually the module path) becomes the source column.
        self.logf(Level::from(record.level()), record.target(), *record.args());
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Install a logger built from `config` as the global logger.
pub fn init(config: &Config) -> Result<&'static Logger, InitError> {
    init_with(Logger::from_config(config))
}

/// Install `logger` as the global logger.
pub fn init_with(logger: Logger) -> Result<&'static Logger, InitError> {
    LOGGER
        .set(logger)
        .map_err(|_| InitError::AlreadyInitialized)?;
    Ok(global())
}

/// The global logger, created from the loaded configuration on first use.
pub fn global() -> &'static Logger {
    LOGGER.get_or_init(|| {
        let config = Config::load().unwrap_or_else(|e| {
            let mut config = Config::default();
            config.apply_env_overrides();
            eprintln!("tildelog: {e}; using default configuration");
            config
        });
        Logger::from_config(&config)
    })
}

/// Route `log::info!()` and friends through the global logger.
///
/// `level` overrides the configured threshold when given.
pub fn init_log_bridge(level: Option<log::LevelFilter>) -> Result<(), InitError> {
    let logger = global();
    log::set_logger(logger)?;
    logger.bridged.store(true, Ordering::Release);
    if let Some(level) = level {
        *logger.filter.write() = level;
    }
    log::set_max_level(logger.level_filter());
    Ok(())
}

/// Check if a level is printed by the global logger
pub fn is_enabled(level: Level) -> bool {
    global().is_enabled(level)
}

/// Print a line through the global logger
pub fn log(level: Level, source: &str, message: &str) {
    global().log(level, source, message);
}

/// Print a formatted line through the global logger
pub fn logf(level: Level, source: &str, args: fmt::Arguments) {
    global().logf(level, source, args);
}

// Convenience macros for logging
#[macro_export]
macro_rules! log_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::logger::logf($crate::Level::Debug, $source, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::logger::logf($crate::Level::Info, $source, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::logger::logf($crate::Level::Warn, $source, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::logger::logf($crate::Level::Error, $source, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;
    use crate::sink::CaptureSink;

    fn capture_logger(filter: log::LevelFilter) -> (Logger, CaptureSink) {
        let capture = CaptureSink::new();
        let logger = Logger::new(Box::new(capture.clone()), filter);
        (logger, capture)
    }

    #[test]
    fn test_filtered_levels_print_nothing() {
        let (logger, capture) = capture_logger(log::LevelFilter::Warn);
        logger.log(Level::Info, "Test", "hidden");
        logger.log(Level::Debug, "Test", "hidden");
        assert!(capture.lines().is_empty());

        logger.log(Level::Error, "Test", "shown");
        assert_eq!(capture.lines().len(), 1);
    }

    #[test]
    fn test_set_level_filter() {
        let (logger, capture) = capture_logger(log::LevelFilter::Off);
        logger.log(Level::Error, "Test", "hidden");
        logger.set_level_filter(log::LevelFilter::Debug);
        logger.log(Level::Debug, "Test", "shown");

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].text().ends_with(" - shown"));
    }

    #[test]
    fn test_logf_formats_arguments() {
        let (logger, capture) = capture_logger(log::LevelFilter::Info);
        logger.logf(Level::Info, "Net", format_args!("~a{}~ of {}", 3, 4));

        let lines = capture.lines();
        let last = lines[0].segments.last().expect("message segment");
        assert_eq!(last.text, "3");
        assert_eq!(last.color, Some(Color::RED));
    }

    #[test]
    fn test_log_crate_records_use_target_as_source() {
        let (logger, capture) = capture_logger(log::LevelFilter::Debug);
        log::Log::log(
            &logger,
            &log::Record::builder()
                .level(log::Level::Trace)
                .target("bridge")
                .args(format_args!("from log"))
                .build(),
        );

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        let expected = format!("] {:<15} - {:<8} - from log", "bridge", "DEBUG");
        assert!(lines[0].text().ends_with(&expected));
    }

    #[test]
    fn test_debug_impl() {
        let (logger, _capture) = capture_logger(log::LevelFilter::Info);
        let debug_str = format!("{:?}", logger);
        assert!(debug_str.contains("Logger"));
        assert!(debug_str.contains("Info"));
    }
}
