//! Crypto price forecast API server
//!
//! # Architecture
//! - **core**: Model types (PriceModel trait, ModelCollection)
//! - **dispatcher**: Prediction dispatch (model lookup, heuristic fallback)
//! - **infrastructure**: Cold path (logging, metrics, config, api)

use forecast_api::core::ModelCollection;
use forecast_api::dispatcher::PredictionDispatcher;
use forecast_api::infrastructure::logging::init_logging;
use forecast_api::infrastructure::metrics::MetricsCollector;
use forecast_api::infrastructure::reporter::MetricsReporter;
use forecast_api::infrastructure::{config::Config, start_server};
use forecast_api::Result;
use std::sync::Arc;

/// Main application state
pub struct ForecastApp {
    config: Config,
}

impl ForecastApp {
    /// Create new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the service until shutdown
    pub async fn run(&self) -> Result<()> {
        tracing::info!("Starting Crypto Forecast API...");

        // 1. Load model collection (startup only, read-only afterwards)
        let models = ModelCollection::load(&self.config.models.artifact_path)?;
        tracing::info!("Model collection ready: {} asset models", models.len());
        let models = Arc::new(models);

        // 2. Initialize metrics
        let metrics = Arc::new(MetricsCollector::new());

        // 3. Build the dispatcher
        let dispatcher = Arc::new(PredictionDispatcher::new(models, metrics.clone()));

        // 4. Start metrics reporter if enabled
        if self.config.observability.enabled {
            let reporter =
                MetricsReporter::new(metrics.clone(), self.config.observability.interval_seconds);
            tokio::spawn(async move {
                reporter.run().await;
            });
            tracing::info!(
                "Metrics reporter started (interval: {}s)",
                self.config.observability.interval_seconds
            );
        } else {
            tracing::info!("Metrics reporting disabled.");
        }

        // 5. Run the API server (blocks until shutdown)
        start_server(dispatcher, metrics, &self.config.api).await
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Guards must stay alive for the lifetime of the process
    let _guards = init_logging();

    // Load config or use defaults
    let config = Config::load().unwrap_or_default();

    let app = ForecastApp::new(config);
    app.run().await?;

    Ok(())
}
