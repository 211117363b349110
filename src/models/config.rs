//! Configuration data model and validation

use crate::defaults;
use crate::error::{AppError, Result};
use crate::logging::LogLevel;
use crate::models::ProbeMode;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target URL to probe
    #[serde(default = "default_target_url")]
    pub target_url: String,

    /// Probe mode (basic or comprehensive)
    #[serde(default = "default_mode")]
    pub mode: ProbeMode,

    /// Number of independent sequential probes to run
    #[serde(default = "default_probe_count")]
    pub probe_count: u32,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Emit the outcome as JSON instead of the result card
    #[serde(default)]
    pub json: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Explicit diagnostics log level; when unset, the level follows the
    /// debug/verbose flags
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            mode: default_mode(),
            probe_count: default_probe_count(),
            enable_color: default_enable_color(),
            json: false,
            verbose: false,
            debug: false,
            log_level: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and return any errors.
    ///
    /// The target URL is only checked for non-emptiness. No format validation
    /// happens here: a malformed URL is a legal probe target that will
    /// surface as a network failure when the transport rejects it.
    pub fn validate(&self) -> Result<()> {
        if self.target_url.trim().is_empty() {
            return Err(AppError::config("Target URL cannot be empty"));
        }

        if self.probe_count == 0 {
            return Err(AppError::config("Probe count must be greater than 0"));
        }

        if self.probe_count > 1000 {
            return Err(AppError::config("Probe count cannot exceed 1000"));
        }

        Ok(())
    }

    /// Target host for display purposes, falling back to the raw URL when it
    /// does not parse
    pub fn display_host(&self) -> String {
        url::Url::parse(&self.target_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
            .unwrap_or_else(|| self.target_url.clone())
    }
}

fn default_target_url() -> String {
    defaults::DEFAULT_TARGET_URL.to_string()
}

fn default_mode() -> ProbeMode {
    ProbeMode::Basic
}

fn default_probe_count() -> u32 {
    defaults::DEFAULT_PROBE_COUNT
}

fn default_enable_color() -> bool {
    defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.target_url, "https://bot.krowzie.uk");
        assert_eq!(config.mode, ProbeMode::Basic);
        assert_eq!(config.probe_count, 1);
        assert!(config.enable_color);
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let config = Config {
            target_url: "   ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_malformed_url() {
        // Malformed URLs are probe targets, not config errors
        let config = Config {
            target_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_probe_count_bounds() {
        let config = Config {
            probe_count: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            probe_count: 1001,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display_host() {
        let config = Config {
            target_url: "https://example.com/path".to_string(),
            ..Config::default()
        };
        assert_eq!(config.display_host(), "example.com");

        let config = Config {
            target_url: "not a url".to_string(),
            ..Config::default()
        };
        assert_eq!(config.display_host(), "not a url");
    }
}
