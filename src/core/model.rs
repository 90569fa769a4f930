//! Per-asset price models
//!
//! The dispatcher only sees the `PriceModel` trait; the concrete regressor
//! behind it comes from the persisted artifact.

use crate::{ForecastError, Result};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Interface for per-asset price models
///
/// `features` holds a single observation; the return value is the
/// predicted price for that observation.
pub trait PriceModel: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<f64>;
}

/// Concrete regressor type persisted in the model artifact
pub type ForestRegressor = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Random forest regressor wrapper
pub struct ForestModel {
    inner: ForestRegressor,
}

impl ForestModel {
    pub fn new(inner: ForestRegressor) -> Self {
        Self { inner }
    }
}

impl PriceModel for ForestModel {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        let matrix = DenseMatrix::from_2d_vec(&vec![features.to_vec()])
            .map_err(|e| ForecastError::Model(format!("Matrix creation failed: {}", e)))?;

        let predictions = self
            .inner
            .predict(&matrix)
            .map_err(|e| ForecastError::Model(format!("Prediction failed: {}", e)))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| ForecastError::Model("No prediction returned".to_string()))
    }
}
