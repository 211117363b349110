//! HTTP probing and timing measurements
//!
//! The probe issues one primary request under a fixed deadline and measures
//! elapsed wall-clock time around it. In comprehensive mode it follows up
//! with a best-effort secondary request that estimates download throughput;
//! that request can fail for any reason without failing the probe.

use crate::{
    defaults,
    error::{AppError, ProbeError, Result},
    logging::Logger,
    models::{ProbeRequest, ProbeResult},
};
use async_trait::async_trait;
use reqwest::{
    header::{CACHE_CONTROL, PRAGMA},
    Client, Method, StatusCode,
};
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Probe abstraction so the session layer can be exercised against fakes
#[async_trait]
pub trait LatencyProbe: Send + Sync {
    /// Perform one measurement attempt against the request's target URL
    async fn measure(&self, request: &ProbeRequest)
        -> std::result::Result<ProbeResult, ProbeError>;
}

/// Failure of the secondary throughput measurement. Internal only: it is
/// logged for diagnostics and otherwise absorbed, never surfaced to the user.
#[derive(Debug, thiserror::Error)]
enum SecondaryFailure {
    #[error("deadline elapsed")]
    Deadline,
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("non-success status {0}")]
    Status(StatusCode),
}

/// HTTP prober backed by a shared reqwest client
pub struct Prober {
    client: Client,
    logger: Logger,
}

impl Prober {
    /// Create a new prober
    pub fn new() -> Result<Self> {
        Self::with_logger(Logger::default())
    }

    /// Create a new prober with a diagnostics logger
    pub fn with_logger(logger: Logger) -> Result<Self> {
        // No client-level timeout: the only timeout in the system is the
        // per-request deadline, so a slow target always reports as Timeout
        // rather than as a transport error.
        let client = Client::builder()
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, logger })
    }

    /// Best-effort throughput measurement: full-body GET under its own
    /// independent deadline. Returns `None` on any failure.
    async fn measure_download(
        &self,
        url: &str,
        deadline: Duration,
        logger: &Logger,
    ) -> Option<f64> {
        let start = Instant::now();

        let fetched = timeout(deadline, self.fetch_body(url)).await;
        let elapsed = start.elapsed().as_secs_f64();

        match fetched {
            Ok(Ok(bytes)) => {
                let speed = download_speed_mbps(bytes, elapsed);
                if speed.is_none() {
                    logger.warn(&format!(
                        "Download speed undefined for {} bytes in {:.6}s, omitting figure",
                        bytes, elapsed
                    ));
                }
                speed
            }
            Ok(Err(err)) => {
                logger.debug(&format!("Couldn't measure download speed: {}", err));
                None
            }
            Err(_) => {
                logger.debug(&format!(
                    "Couldn't measure download speed: {}",
                    SecondaryFailure::Deadline
                ));
                None
            }
        }
    }

    /// Fetch the target and read its full body, returning the body size
    async fn fetch_body(&self, url: &str) -> std::result::Result<usize, SecondaryFailure> {
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SecondaryFailure::Status(status));
        }

        let body = response.bytes().await?;
        Ok(body.len())
    }
}

#[async_trait]
impl LatencyProbe for Prober {
    async fn measure(
        &self,
        request: &ProbeRequest,
    ) -> std::result::Result<ProbeResult, ProbeError> {
        let logger = self.logger.for_probe();

        let method = if request.mode.is_comprehensive() {
            Method::GET
        } else {
            Method::HEAD
        };

        if logger.enabled(crate::logging::LogLevel::Debug) {
            logger.debug(&format!(
                "Probing {} ({} {})",
                request.url, method, request.mode
            ));
        }

        // Start timestamp strictly before the request is issued. The deadline
        // timer is scope-bound to this call: when the future settles, the
        // timer is dropped with it and cannot fire later or leak into the
        // next invocation.
        let start = Instant::now();

        let send = self
            .client
            .request(method, request.url.as_str())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send();

        let response = match timeout(request.timeout, send).await {
            // Deadline fired before the request settled
            Err(_) => return Err(ProbeError::timeout(request.timeout_secs())),
            // Any other transport failure: DNS, TLS, refused, malformed URL
            Ok(Err(err)) => return Err(ProbeError::network(err.to_string())),
            Ok(Ok(response)) => response,
        };

        let connection_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        logger.info(&format!(
            "Primary request settled in {:.2} ms",
            connection_time_ms
        ));

        // The response status is deliberately not inspected: the timing
        // request may target servers that deny the caller any view of the
        // response, and reaching the server is the measurement.
        drop(response);

        let mut result = ProbeResult::connection_only(connection_time_ms);

        if request.mode.is_comprehensive() {
            let speed = self
                .measure_download(&request.url, request.timeout, &logger)
                .await;
            result = result.with_download_speed(speed);
        }

        Ok(result)
    }
}

/// Compute download speed in MB/s from a body size and elapsed seconds.
///
/// A zero, negative, or non-finite elapsed time leaves the speed undefined;
/// the figure is omitted rather than reported as infinite.
pub fn download_speed_mbps(bytes: usize, seconds: f64) -> Option<f64> {
    if seconds <= 0.0 || !seconds.is_finite() {
        return None;
    }
    Some((bytes as f64 / defaults::BYTES_PER_MEGABYTE) / seconds)
}
