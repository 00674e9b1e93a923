//! Structured logging.
//!
//! Log entries are emitted either as compact text or as one JSON object
//! per line, and carry the request id of the request being served so
//! concurrent dispatches can be told apart. Output is written to
//! stderr; level filtering happens before any formatting work.
//!
//! # Example
//!
//! ```
//! use trellis_core::logging::{LogConfig, LogLevel, Logger};
//!
//! let config = LogConfig::new().level(LogLevel::Debug).json_output(true);
//! let logger = Logger::new(config, "my_app");
//! logger.log(LogLevel::Info, "listening", None);
//! ```

use std::fmt::Write as _;

/// Log levels, in increasing order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Most verbose, for detailed debugging.
    Trace,
    /// Debug information, off by default.
    Debug,
    /// General information about normal operation.
    Info,
    /// Something unexpected but recoverable.
    Warn,
    /// An error that affected request processing.
    Error,
}

impl LogLevel {
    /// The level as a lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    level: LogLevel,
    json_output: bool,
    include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            json_output: false,
            include_target: true,
        }
    }
}

impl LogConfig {
    /// Creates the default configuration: `Info` level, compact text
    /// output, target included.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum level to emit.
    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Switches between JSON (`true`) and compact text output.
    #[must_use]
    pub fn json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }

    /// Whether entries carry the module target.
    #[must_use]
    pub fn include_target(mut self, include: bool) -> Self {
        self.include_target = include;
        self
    }

    /// Whether `level` passes the configured filter.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }
}

/// A configured log emitter bound to one target.
#[derive(Debug, Clone)]
pub struct Logger {
    config: LogConfig,
    target: &'static str,
}

impl Logger {
    /// Creates a logger for `target` with the given configuration.
    #[must_use]
    pub fn new(config: LogConfig, target: &'static str) -> Self {
        Self { config, target }
    }

    /// Whether `level` would be emitted.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.config.enabled(level)
    }

    /// Emits one entry to stderr, if the level passes the filter.
    pub fn log(&self, level: LogLevel, message: &str, request_id: Option<u64>) {
        if !self.enabled(level) {
            return;
        }
        eprintln!("{}", self.format(level, message, request_id));
    }

    fn format(&self, level: LogLevel, message: &str, request_id: Option<u64>) -> String {
        if self.config.json_output {
            let mut entry = serde_json::Map::new();
            entry.insert("level".into(), level.as_str().into());
            entry.insert("message".into(), message.into());
            if let Some(id) = request_id {
                entry.insert("request_id".into(), id.into());
            }
            if self.config.include_target {
                entry.insert("target".into(), self.target.into());
            }
            serde_json::Value::Object(entry).to_string()
        } else {
            let mut line = String::new();
            let _ = write!(line, "[{:<5}]", level.as_str());
            if self.config.include_target {
                let _ = write!(line, " {}:", self.target);
            }
            let _ = write!(line, " {message}");
            if let Some(id) = request_id {
                let _ = write!(line, " (request={id})");
            }
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn default_config_suppresses_debug() {
        let config = LogConfig::default();
        assert!(!config.enabled(LogLevel::Debug));
        assert!(config.enabled(LogLevel::Info));
        assert!(config.enabled(LogLevel::Error));
    }

    #[test]
    fn text_format_carries_target_and_request_id() {
        let logger = Logger::new(LogConfig::new(), "test_target");
        let line = logger.format(LogLevel::Info, "route matched", Some(3));
        assert_eq!(line, "[info ] test_target: route matched (request=3)");
    }

    #[test]
    fn text_format_without_target() {
        let logger = Logger::new(LogConfig::new().include_target(false), "test_target");
        let line = logger.format(LogLevel::Warn, "slow handler", None);
        assert_eq!(line, "[warn ] slow handler");
    }

    #[test]
    fn json_format_is_one_object() {
        let logger = Logger::new(LogConfig::new().json_output(true), "test_target");
        let line = logger.format(LogLevel::Info, "route matched", Some(7));
        assert_eq!(
            line,
            r#"{"level":"info","message":"route matched","request_id":7,"target":"test_target"}"#
        );
    }
}
