//! Diagnostics logging for the server connection probe
//!
//! The probe swallows secondary-measurement failures by design; this logger
//! is where those failures go so they remain visible for diagnostics. Log
//! output goes to stderr and never mixes with the result card on stdout.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m", // Cyan
            LogLevel::Info => "\x1b[32m",  // Green
            LogLevel::Warn => "\x1b[33m",  // Yellow
            LogLevel::Error => "\x1b[31m", // Red
        }
    }

    fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// Console logger with per-probe correlation IDs
#[derive(Debug, Clone)]
pub struct Logger {
    /// Minimum log level to output
    min_level: LogLevel,
    /// Whether to use colored output
    use_color: bool,
    /// Correlation ID tying log lines to one probe invocation
    correlation_id: Option<Uuid>,
}

impl Logger {
    /// Create a new logger
    pub fn new(min_level: LogLevel, use_color: bool) -> Self {
        Self {
            min_level,
            use_color,
            correlation_id: None,
        }
    }

    /// Create a logger whose minimum level follows the debug/verbose flags
    pub fn from_flags(debug: bool, verbose: bool, use_color: bool) -> Self {
        let min_level = if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };
        Self::new(min_level, use_color)
    }

    /// Derive a logger carrying a fresh correlation ID for one probe
    pub fn for_probe(&self) -> Self {
        Self {
            correlation_id: Some(Uuid::new_v4()),
            ..self.clone()
        }
    }

    pub fn correlation_id(&self) -> Option<Uuid> {
        self.correlation_id
    }

    /// Whether a message at the given level would be emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        eprintln!("{}", self.format_entry(level, message));
    }

    /// Format a single log line
    fn format_entry(&self, level: LogLevel, message: &str) -> String {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        let correlation = self
            .correlation_id
            .map(|id| format!(" probe={}", id))
            .unwrap_or_default();

        if self.use_color {
            format!(
                "{} {}[{}]{}{} {}",
                timestamp,
                level.color_code(),
                level.as_str(),
                LogLevel::reset_code(),
                correlation,
                message
            )
        } else {
            format!("{} [{}]{} {}", timestamp, level.as_str(), correlation, message)
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Warn, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering_and_filtering() {
        let logger = Logger::new(LogLevel::Info, false);
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Error));
    }

    #[test]
    fn test_from_flags() {
        assert!(Logger::from_flags(true, false, false).enabled(LogLevel::Debug));
        assert!(Logger::from_flags(false, true, false).enabled(LogLevel::Info));
        assert!(!Logger::from_flags(false, true, false).enabled(LogLevel::Debug));
        assert!(!Logger::from_flags(false, false, false).enabled(LogLevel::Info));
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_probe_logger_carries_correlation_id() {
        let base = Logger::new(LogLevel::Debug, false);
        assert!(base.correlation_id().is_none());

        let probe_logger = base.for_probe();
        let id = probe_logger.correlation_id().unwrap();

        let line = probe_logger.format_entry(LogLevel::Debug, "secondary fetch failed");
        assert!(line.contains(&format!("probe={}", id)));
        assert!(line.contains("[DEBUG]"));
        assert!(line.contains("secondary fetch failed"));
    }

    #[test]
    fn test_plain_format_has_no_ansi_codes() {
        let logger = Logger::new(LogLevel::Debug, false);
        let line = logger.format_entry(LogLevel::Error, "boom");
        assert!(!line.contains("\x1b["));
        assert!(line.contains("[ERROR] boom"));
    }
}
