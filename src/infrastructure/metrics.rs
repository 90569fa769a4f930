//! Metrics collection for system monitoring
//!
//! Lock-free metrics counters using atomic operations.
//! Updated in the request path, exported by the push reporter.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime};

/// System metrics collector
///
/// Thread-safe counters updated from request handlers.
/// Snapshots taken for the push reporter.
pub struct MetricsCollector {
    /// Total prediction requests received
    requests_total: AtomicU64,
    /// Requests answered with an error response
    failed_requests: AtomicU64,
    /// Predictions served by a trained model
    model_predictions: AtomicU64,
    /// Predictions served by the heuristic fallback
    heuristic_predictions: AtomicU64,
    /// Last request timestamp (Unix millis)
    last_request_time: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

/// Metrics snapshot for the push reporter
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub failed_requests: u64,
    pub model_predictions: u64,
    pub heuristic_predictions: u64,
    pub request_rate: f64, // requests per second
    pub last_request_unix_ms: u64,
    pub uptime_seconds: u64,
}

impl MetricsCollector {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            failed_requests: AtomicU64::new(0),
            model_predictions: AtomicU64::new(0),
            heuristic_predictions: AtomicU64::new(0),
            last_request_time: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record an incoming prediction request
    #[inline]
    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.update_last_request_time();
    }

    /// Record a request that ended in an error response
    #[inline]
    pub fn record_failure(&self) {
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a prediction served by a trained model
    #[inline]
    pub fn record_model_prediction(&self) {
        self.model_predictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a prediction served by the heuristic fallback
    #[inline]
    pub fn record_heuristic_prediction(&self) {
        self.heuristic_predictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Update last request timestamp
    #[inline]
    fn update_last_request_time(&self) {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        self.last_request_time.store(now, Ordering::Relaxed);
    }

    /// Get current snapshot of metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);

        let uptime = self.start_time.elapsed().as_secs();
        let rate = if uptime > 0 {
            requests as f64 / uptime as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            requests_total: requests,
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            model_predictions: self.model_predictions.load(Ordering::Relaxed),
            heuristic_predictions: self.heuristic_predictions.load(Ordering::Relaxed),
            request_rate: rate,
            last_request_unix_ms: self.last_request_time.load(Ordering::Relaxed),
            uptime_seconds: uptime,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
