//! Command-line interface module

use crate::models::ProbeMode;
use clap::Parser;

/// Server Connection Probe - measures connection latency and download speed
#[derive(Parser, Debug, Clone)]
#[command(name = "server-probe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Target server URL to probe [default: https://bot.krowzie.uk]
    #[arg(long)]
    pub url: Option<String>,

    /// Probe mode: 'basic' measures connection time only, 'comprehensive'
    /// also attempts a download speed measurement [default: basic]
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<ProbeMode>,

    /// Number of independent sequential probes to run [default: 1]
    #[arg(short, long)]
    pub count: Option<u32>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Emit the outcome as JSON instead of the result card
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.count == Some(0) {
            return Err("Probe count must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.json || self.no_color {
            false // JSON output is never colored
        } else if self.color {
            true // Force color output when --color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }
}

/// Parse a probe mode argument
fn parse_mode(s: &str) -> Result<ProbeMode, String> {
    s.parse::<ProbeMode>().map_err(|e| e.to_string())
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check for NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for FORCE_COLOR environment variable
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    true
}
