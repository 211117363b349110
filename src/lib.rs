//! Server Connection Probe
//!
//! A command-line tool that measures round-trip connection latency to a
//! user-specified server URL and, in comprehensive mode, estimates
//! approximate download throughput with a best-effort secondary request.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;
pub mod session;

// Re-export commonly used types
pub use error::{AppError, ProbeError, Result};
pub use models::{Config, ProbeMode, ProbePhase, ProbeRequest, ProbeResult};
pub use probe::{LatencyProbe, Prober};
pub use session::ProbeSession;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TARGET_URL: &str = "https://bot.krowzie.uk";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_PROBE_COUNT: u32 = 1;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Divisor for converting a byte count to mebibytes when computing
    /// download speed in MB/s.
    pub const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;
}
