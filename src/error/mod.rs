//! Error handling for the server connection probe

use thiserror::Error;

/// Outcome of a failed probe, as shown to the user.
///
/// Exactly two user-visible kinds exist: the fixed 10-second deadline firing,
/// and every other transport-level failure (DNS, TLS, connection refused,
/// malformed URL). Failures of the optional secondary throughput request are
/// never represented here; they are absorbed inside the probe.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    /// The primary request did not settle before the deadline fired
    #[error("Connection timed out after {0} seconds")]
    Timeout(u64),

    /// Any other transport-level failure of the primary request
    #[error("Error: {0}")]
    Network(String),
}

impl ProbeError {
    /// Create a timeout error for the given deadline
    pub fn timeout(deadline_secs: u64) -> Self {
        Self::Timeout(deadline_secs)
    }

    /// Create a network error from the underlying failure's description
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Custom error types for the application shell around the probe
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network connectivity errors
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Parsing errors (URLs, JSON, etc.)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// I/O errors (terminal writes, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Network(_) => "NETWORK",
            Self::Timeout(_) => "TIMEOUT",
            Self::Parse(_) => "PARSE",
            Self::Io(_) => "IO",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Parse(_) => 1, // Invalid configuration/usage
            Self::Network(_) => 2,                 // Network issues
            Self::Timeout(_) => 3,                 // Timeout issues
            Self::Io(_) => 5,                      // I/O issues
            Self::Internal(_) => 99,               // Internal/unexpected errors
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Network(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Timeout(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Probe failures surface at the application edge as their own categories so
// the process exit code distinguishes a timeout from a transport failure.
impl From<ProbeError> for AppError {
    fn from(error: ProbeError) -> Self {
        match error {
            ProbeError::Timeout(_) => Self::timeout(error.to_string()),
            ProbeError::Network(_) => Self::network(error.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", error))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error context trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error
    fn context(self, message: &'static str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let original_error = e.into();
            let context = f();
            AppError::internal(format!("{}: {}", context, original_error))
        })
    }

    fn context(self, message: &'static str) -> Result<T> {
        self.with_context(|| message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_display_is_user_facing_text() {
        let timeout = ProbeError::timeout(10);
        assert_eq!(timeout.to_string(), "Connection timed out after 10 seconds");

        let network = ProbeError::network("dns error: failed to lookup address");
        assert_eq!(
            network.to_string(),
            "Error: dns error: failed to lookup address"
        );
    }

    #[test]
    fn test_probe_error_kind_checks() {
        assert!(ProbeError::timeout(10).is_timeout());
        assert!(!ProbeError::network("refused").is_timeout());
    }

    #[test]
    fn test_probe_error_to_app_error() {
        let app: AppError = ProbeError::timeout(10).into();
        assert_eq!(app.category(), "TIMEOUT");
        assert_eq!(app.exit_code(), 3);

        let app: AppError = ProbeError::network("connection refused").into();
        assert_eq!(app.category(), "NETWORK");
        assert_eq!(app.exit_code(), 2);
    }

    #[test]
    fn test_app_error_categories_and_exit_codes() {
        assert_eq!(AppError::config("c").category(), "CONFIG");
        assert_eq!(AppError::config("c").exit_code(), 1);
        assert_eq!(AppError::network("n").category(), "NETWORK");
        assert_eq!(AppError::network("n").exit_code(), 2);
        assert_eq!(AppError::timeout("t").category(), "TIMEOUT");
        assert_eq!(AppError::timeout("t").exit_code(), 3);
        assert_eq!(AppError::parse("p").exit_code(), 1);
        assert_eq!(AppError::io("i").exit_code(), 5);
        assert_eq!(AppError::internal("x").exit_code(), 99);
    }

    #[test]
    fn test_console_formatting() {
        let error = AppError::config("Test error");
        let plain = error.format_for_console(false);
        let colored = error.format_for_console(true);

        assert!(plain.contains("[CONFIG]"));
        assert!(plain.contains("Test error"));
        assert!(colored.contains("Test error"));
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert_eq!(app_error.category(), "IO");

        let json_error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert_eq!(app_error.category(), "PARSE");
    }

    #[test]
    fn test_error_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ));

        let with_context = result.context("While loading environment defaults");
        let error = with_context.unwrap_err();
        assert!(error
            .to_string()
            .contains("While loading environment defaults"));
    }
}
