//! Test utilities for model construction
//!
//! Deterministic stand-ins for the opaque models the dispatcher works with.

use crate::core::model::{ForestRegressor, PriceModel};
use crate::{ForecastError, Result};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Model that always predicts the same price
pub struct FixedModel(pub f64);

impl PriceModel for FixedModel {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(self.0)
    }
}

/// Model that always fails
pub struct FailingModel;

impl PriceModel for FailingModel {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Err(ForecastError::Model("prediction failed".to_string()))
    }
}

/// Fit a forest on a constant target: every tree predicts the constant,
/// so the forest output is exact regardless of bootstrap sampling.
pub fn fit_constant_forest(value: f64) -> ForestRegressor {
    let x = DenseMatrix::from_2d_vec(&vec![
        vec![1.0],
        vec![2.0],
        vec![3.0],
        vec![4.0],
        vec![5.0],
        vec![6.0],
    ])
    .unwrap();
    let y = vec![value; 6];

    let params = RandomForestRegressorParameters::default()
        .with_n_trees(4)
        .with_max_depth(4);

    RandomForestRegressor::fit(&x, &y, params).unwrap()
}
