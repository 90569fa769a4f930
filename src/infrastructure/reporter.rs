//! Push-based metrics reporter
//!
//! Periodically outputs request metrics as structured JSON log lines.
//! No metrics HTTP endpoint, no incoming connections - only outbound data.

use crate::infrastructure::metrics::MetricsCollector;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Periodic reporter over the shared metrics collector
pub struct MetricsReporter {
    metrics: Arc<MetricsCollector>,
    interval: Duration,
}

impl MetricsReporter {
    pub fn new(metrics: Arc<MetricsCollector>, interval_seconds: u64) -> Self {
        Self {
            metrics,
            interval: Duration::from_secs(interval_seconds),
        }
    }

    /// Run the reporter in a loop, outputting metrics periodically
    pub async fn run(self) {
        info!(
            "MetricsReporter: push-based metrics every {:?}",
            self.interval
        );

        loop {
            tokio::time::sleep(self.interval).await;

            let snapshot = self.metrics.snapshot();
            match serde_json::to_string(&snapshot) {
                Ok(json) => {
                    // Prefix so log consumers can filter metric lines
                    info!("METRICS_JSON:{}", json);
                }
                Err(e) => {
                    warn!("Failed to serialize metrics snapshot: {}", e);
                }
            }
        }
    }
}
