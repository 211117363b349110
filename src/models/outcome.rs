//! Probe request and result data models

use crate::defaults;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Test-mode selection for a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMode {
    /// Connection-time-only measurement using a lightweight HEAD request
    Basic,
    /// Connection time plus best-effort throughput measurement using a
    /// second, heavier GET request
    Comprehensive,
}

impl ProbeMode {
    /// Human-readable label matching the mode selector options
    pub fn label(&self) -> &'static str {
        match self {
            ProbeMode::Basic => "Basic Test",
            ProbeMode::Comprehensive => "Full Speed Test",
        }
    }

    pub fn is_comprehensive(&self) -> bool {
        matches!(self, ProbeMode::Comprehensive)
    }
}

impl FromStr for ProbeMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" | "simple" => Ok(ProbeMode::Basic),
            "comprehensive" | "full" => Ok(ProbeMode::Comprehensive),
            _ => Err(AppError::parse(format!(
                "Invalid probe mode '{}' (expected 'basic' or 'comprehensive')",
                s
            ))),
        }
    }
}

impl fmt::Display for ProbeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeMode::Basic => write!(f, "basic"),
            ProbeMode::Comprehensive => write!(f, "comprehensive"),
        }
    }
}

/// One user-triggered measurement attempt against a target URL.
///
/// Created when the probe is triggered and consumed immediately; nothing is
/// retained across invocations. The URL is deliberately not validated here:
/// a malformed URL surfaces as a network failure from the transport, exactly
/// like an unreachable one.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub url: String,
    pub mode: ProbeMode,
    pub timeout: Duration,
}

impl ProbeRequest {
    /// Create a probe request with the fixed default deadline
    pub fn new<S: Into<String>>(url: S, mode: ProbeMode) -> Self {
        Self {
            url: url.into(),
            mode,
            timeout: defaults::DEFAULT_TIMEOUT,
        }
    }

    /// Override the deadline, mainly for tests against local mock servers
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }
}

/// Metrics produced by one successful probe.
///
/// `download_speed_mbps` is present only when the probe ran in comprehensive
/// mode and the secondary fetch succeeded with a readable body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Elapsed wall-clock time around the primary request, float milliseconds
    pub connection_time_ms: f64,

    /// Approximate download throughput in MB/s, when measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_speed_mbps: Option<f64>,
}

impl ProbeResult {
    /// Create a connection-time-only result
    pub fn connection_only(connection_time_ms: f64) -> Self {
        Self {
            connection_time_ms,
            download_speed_mbps: None,
        }
    }

    /// Attach a measured download speed
    pub fn with_download_speed(mut self, speed_mbps: Option<f64>) -> Self {
        self.download_speed_mbps = speed_mbps;
        self
    }

    /// Connection time formatted for display, two decimal places
    pub fn connection_time_display(&self) -> String {
        format!("{:.2} ms", self.connection_time_ms)
    }

    /// Download speed formatted for display, two decimal places
    pub fn download_speed_display(&self) -> Option<String> {
        self.download_speed_mbps
            .map(|speed| format!("{:.2} MB/s", speed))
    }
}

/// Per-invocation probe lifecycle.
///
/// A new invocation always starts a fresh `Idle -> Running` transition;
/// terminal states are final for that invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbePhase {
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl ProbePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProbePhase::Succeeded | ProbePhase::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("basic".parse::<ProbeMode>().unwrap(), ProbeMode::Basic);
        assert_eq!("BASIC".parse::<ProbeMode>().unwrap(), ProbeMode::Basic);
        assert_eq!("simple".parse::<ProbeMode>().unwrap(), ProbeMode::Basic);
        assert_eq!(
            "comprehensive".parse::<ProbeMode>().unwrap(),
            ProbeMode::Comprehensive
        );
        assert_eq!(
            "full".parse::<ProbeMode>().unwrap(),
            ProbeMode::Comprehensive
        );
        assert!("quick".parse::<ProbeMode>().is_err());
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(ProbeMode::Basic.label(), "Basic Test");
        assert_eq!(ProbeMode::Comprehensive.label(), "Full Speed Test");
        assert_eq!(ProbeMode::Basic.to_string(), "basic");
    }

    #[test]
    fn test_request_defaults() {
        let request = ProbeRequest::new("https://example.com", ProbeMode::Basic);
        assert_eq!(request.timeout, Duration::from_secs(10));
        assert_eq!(request.timeout_secs(), 10);

        let request = request.with_timeout(Duration::from_millis(500));
        assert_eq!(request.timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_result_display_formatting() {
        let result = ProbeResult::connection_only(12.3456);
        assert_eq!(result.connection_time_display(), "12.35 ms");
        assert!(result.download_speed_display().is_none());

        let result = result.with_download_speed(Some(1.005));
        assert_eq!(result.download_speed_display().unwrap(), "1.00 MB/s");
    }

    #[test]
    fn test_result_json_omits_absent_speed() {
        let result = ProbeResult::connection_only(42.0);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("connection_time_ms"));
        assert!(!json.contains("download_speed_mbps"));

        let result = result.with_download_speed(Some(3.5));
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("download_speed_mbps"));

        let parsed: ProbeResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_phase_terminality() {
        assert!(!ProbePhase::Idle.is_terminal());
        assert!(!ProbePhase::Running.is_terminal());
        assert!(ProbePhase::Succeeded.is_terminal());
        assert!(ProbePhase::Failed.is_terminal());
    }
}
