//! Prediction dispatch
//!
//! For each asset in a request, looks up its trained model and predicts the
//! next price from the current one. Assets without a model fall back to a
//! randomized multiplicative heuristic, not a real forecast.

use crate::core::ModelCollection;
use crate::infrastructure::metrics::MetricsCollector;
use crate::Result;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;

/// Fallback factor bounds, closed-open: [0.98, 1.02)
const HEURISTIC_MIN_FACTOR: f64 = 0.98;
const HEURISTIC_MAX_FACTOR: f64 = 1.02;

/// Stateless prediction dispatcher over the read-only model collection
pub struct PredictionDispatcher {
    models: Arc<ModelCollection>,
    metrics: Arc<MetricsCollector>,
}

impl PredictionDispatcher {
    pub fn new(models: Arc<ModelCollection>, metrics: Arc<MetricsCollector>) -> Self {
        Self { models, metrics }
    }

    /// Predict the next price for every asset in the request
    ///
    /// All-or-nothing: the first model failure aborts the whole batch and
    /// no partial results are returned.
    pub fn predict_batch(&self, request: &HashMap<String, f64>) -> Result<HashMap<String, f64>> {
        let mut predictions = HashMap::with_capacity(request.len());

        for (asset_id, &current_price) in request {
            let predicted_price = match self.models.get(asset_id) {
                Some(model) => {
                    let predicted = model.predict(&[current_price])?;
                    self.metrics.record_model_prediction();
                    predicted
                }
                None => {
                    self.metrics.record_heuristic_prediction();
                    heuristic_forecast(current_price)
                }
            };
            predictions.insert(asset_id.clone(), predicted_price);
        }

        Ok(predictions)
    }
}

/// Randomized fallback: current price scaled by a uniform factor
fn heuristic_forecast(current_price: f64) -> f64 {
    let factor = rand::thread_rng().gen_range(HEURISTIC_MIN_FACTOR..HEURISTIC_MAX_FACTOR);
    current_price * factor
}
