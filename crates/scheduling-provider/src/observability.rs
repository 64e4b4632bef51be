//! Structured logging helpers for the scheduling service call
//!
//! The lookup logs every outbound attempt through this layer, so a single
//! "scheduling call" event is emitted per batch whatever the outcome.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Outbound request metadata for structured logging
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    /// HTTP method
    pub method: String,
    /// Target URL
    pub url: String,
}

impl UpstreamRequest {
    /// Create new request metadata
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }

    /// Log request being sent
    pub fn log_request(&self) {
        debug!(
            method = %self.method,
            url = %self.url,
            "Sending scheduling request"
        );
    }

    /// Log a failure reported by the transport itself
    pub fn log_transport_error(&self, elapsed: Duration, error: &str) {
        warn!(
            method = %self.method,
            url = %self.url,
            elapsed_ms = elapsed.as_millis(),
            error = %error,
            "Scheduling request failed"
        );
    }
}

/// Outbound response metadata for structured logging
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body size in bytes
    pub body_size: usize,
    /// Time elapsed for the request
    pub elapsed: Duration,
}

impl UpstreamResponse {
    /// Create new response metadata
    pub fn new(status: u16, body_size: usize, elapsed: Duration) -> Self {
        Self {
            status,
            body_size,
            elapsed,
        }
    }

    /// Log successful response
    pub fn log_success(&self, request: &UpstreamRequest) {
        info!(
            method = %request.method,
            url = %request.url,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            "Scheduling request succeeded"
        );
    }

    /// Log failed response
    pub fn log_error(&self, request: &UpstreamRequest, error: &str) {
        warn!(
            method = %request.method,
            url = %request.url,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            error = %error,
            "Scheduling request failed"
        );
    }
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
