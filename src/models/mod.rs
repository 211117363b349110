//! Data models and structures for the server connection probe

pub mod config;
pub mod outcome;

// Re-export main model types
pub use config::Config;
pub use outcome::{ProbeMode, ProbePhase, ProbeRequest, ProbeResult};
