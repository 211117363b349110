//! Configuration parsing from CLI arguments and environment variables
//!
//! Precedence: built-in defaults, then `.env` / environment variables, then
//! CLI arguments.

use crate::{
    cli::Cli,
    error::{AppError, Result},
    logging::LogLevel,
    models::{Config, ProbeMode},
};
use std::path::Path;

/// Environment variable names recognized by the probe
pub const ENV_TARGET_URL: &str = "PROBE_URL";
pub const ENV_MODE: &str = "PROBE_MODE";
pub const ENV_COUNT: &str = "PROBE_COUNT";
pub const ENV_COLOR: &str = "PROBE_COLOR";
pub const ENV_LOG_LEVEL: &str = "PROBE_LOG_LEVEL";

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        // Start with default configuration
        let mut config = Config::default();

        // Load from environment file if it exists
        self.load_env_file()?;

        // Merge environment variables into config
        merge_from_env(&mut config)?;

        // Override with CLI arguments
        self.apply_cli_overrides(&mut config);

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Load .env file if it exists
    fn load_env_file(&self) -> Result<()> {
        if Path::new(".env").exists() {
            dotenv::from_filename(".env")
                .map_err(|e| AppError::config(format!("Failed to load .env file: {}", e)))?;

            if self.cli.debug {
                println!("Loaded configuration from .env file");
            }
        } else if self.cli.debug {
            println!("No .env file found, using defaults and CLI arguments");
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration.
    ///
    /// Arguments are `Option`-typed so a user-provided value always wins
    /// over an environment value, even when it matches the built-in default.
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref url) = self.cli.url {
            config.target_url = url.clone();
        }

        if let Some(mode) = self.cli.mode {
            config.mode = mode;
        }

        if let Some(count) = self.cli.count {
            config.probe_count = count;
        }

        if self.cli.no_color || self.cli.json {
            config.enable_color = false;
        } else if self.cli.color {
            config.enable_color = true;
        } else {
            config.enable_color = config.enable_color && self.cli.use_colors();
        }

        // CLI-only flags
        config.json = self.cli.json;
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Merge recognized environment variables into the configuration
fn merge_from_env(config: &mut Config) -> Result<()> {
    if let Ok(url) = std::env::var(ENV_TARGET_URL) {
        if !url.trim().is_empty() {
            config.target_url = url;
        }
    }

    if let Ok(mode) = std::env::var(ENV_MODE) {
        config.mode = mode
            .parse::<ProbeMode>()
            .map_err(|e| AppError::config(format!("Invalid {}: {}", ENV_MODE, e)))?;
    }

    if let Ok(count) = std::env::var(ENV_COUNT) {
        config.probe_count = count
            .parse::<u32>()
            .map_err(|_| AppError::config(format!("Invalid {}: '{}'", ENV_COUNT, count)))?;
    }

    if let Ok(color) = std::env::var(ENV_COLOR) {
        config.enable_color = color
            .parse::<bool>()
            .map_err(|_| AppError::config(format!("Invalid {}: '{}'", ENV_COLOR, color)))?;
    }

    if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
        config.log_level = Some(
            level
                .parse::<LogLevel>()
                .map_err(|e| AppError::config(format!("Invalid {}: {}", ENV_LOG_LEVEL, e)))?,
        );
    }

    Ok(())
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Target URL: {}", config.target_url));
    summary.push(format!("Target Host: {}", config.display_host()));
    summary.push(format!("Mode: {} ({})", config.mode, config.mode.label()));
    summary.push(format!("Probe Count: {}", config.probe_count));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("JSON Output: {}", config.json));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}
