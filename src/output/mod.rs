//! Output formatting and display system
//!
//! Renders the probe outcome as a terminal "card": a metrics panel on
//! success, an error panel on failure. Both a colored and a plain formatter
//! exist behind a common trait.

mod colored;
mod formatter;

pub use colored::ColoredFormatter;
pub use formatter::{OutputFormatter, PlainFormatter};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        }
    }
}
