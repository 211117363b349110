//! Core formatting trait and the plain text implementation

use crate::{
    error::{ProbeError, Result},
    models::ProbeResult,
};

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format a header line for a probe run
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format the metrics panel for a successful probe
    fn format_result_card(&self, result: &ProbeResult, target_url: &str) -> Result<String>;

    /// Format the error panel for a failed probe. The error text itself is
    /// rendered verbatim.
    fn format_error_panel(&self, error: &ProbeError) -> Result<String>;

    /// Format an informational note
    fn format_note(&self, message: &str) -> Result<String>;
}

/// Plain text formatter implementation
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        output.push_str(title);
        output.push('\n');
        output.push_str(&"=".repeat(title.len()));
        output.push('\n');
        Ok(output)
    }

    fn format_result_card(&self, result: &ProbeResult, target_url: &str) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("  {}\n", result.connection_time_display()));
        output.push_str(&format!("  Connection time to {}\n", target_url));

        if let Some(speed) = result.download_speed_display() {
            output.push_str(&format!("  {}\n", "-".repeat(24)));
            output.push_str(&format!("  {}\n", speed));
            output.push_str("  Download speed\n");
        }

        Ok(output)
    }

    fn format_error_panel(&self, error: &ProbeError) -> Result<String> {
        Ok(format!("  {}\n", error))
    }

    fn format_note(&self, message: &str) -> Result<String> {
        Ok(format!("{}\n", message))
    }
}
