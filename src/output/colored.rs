//! Colored output formatting

use crate::{
    error::{ProbeError, Result},
    models::ProbeResult,
    output::formatter::OutputFormatter,
};
use colored::Colorize;

/// Colored formatter implementation
///
/// Same card layout as the plain formatter, with the figures emphasized and
/// the error panel rendered in red. Error text stays verbatim; only its
/// styling changes.
pub struct ColoredFormatter;

impl ColoredFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ColoredFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("{}\n", title.bold()));
        output.push_str(&format!("{}\n", "=".repeat(title.len()).dimmed()));
        Ok(output)
    }

    fn format_result_card(&self, result: &ProbeResult, target_url: &str) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!(
            "  {}\n",
            result.connection_time_display().green().bold()
        ));
        output.push_str(&format!(
            "  {}\n",
            format!("Connection time to {}", target_url).dimmed()
        ));

        if let Some(speed) = result.download_speed_display() {
            output.push_str(&format!("  {}\n", "-".repeat(24).dimmed()));
            output.push_str(&format!("  {}\n", speed.green().bold()));
            output.push_str(&format!("  {}\n", "Download speed".dimmed()));
        }

        Ok(output)
    }

    fn format_error_panel(&self, error: &ProbeError) -> Result<String> {
        Ok(format!("  {}\n", error.to_string().red().bold()))
    }

    fn format_note(&self, message: &str) -> Result<String> {
        Ok(format!("{}\n", message.dimmed()))
    }
}
