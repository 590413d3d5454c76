//! Request counters for the HTTP gateway.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct GatewayMetrics {
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    /// 4xx responses
    pub requests_client_error: AtomicU64,
    /// 5xx responses
    pub requests_server_error: AtomicU64,

    // Latency tracking (sum and count; no histogram)
    pub total_latency_ms: AtomicU64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed request
    pub fn record_request(&self, status: u16, latency: Duration) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        match status {
            200..=399 => self.requests_success.fetch_add(1, Ordering::Relaxed),
            400..=499 => self.requests_client_error.fetch_add(1, Ordering::Relaxed),
            _ => self.requests_server_error.fetch_add(1, Ordering::Relaxed),
        };
        self.total_latency_ms
            .fetch_add(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Get average latency in ms
    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn snapshot(&self) -> RequestCounts {
        RequestCounts {
            total: self.requests_total.load(Ordering::Relaxed),
            success: self.requests_success.load(Ordering::Relaxed),
            client_errors: self.requests_client_error.load(Ordering::Relaxed),
            server_errors: self.requests_server_error.load(Ordering::Relaxed),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestCounts {
    pub total: u64,
    pub success: u64,
    pub client_errors: u64,
    pub server_errors: u64,
}
