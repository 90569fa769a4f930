//! Core types for the forecast service
//!
//! This module contains the fundamental types used throughout the system:
//! - PriceModel: Interface every per-asset model exposes
//! - ForestModel: Random forest regressor loaded from the artifact
//! - ModelCollection: Read-only asset id -> model mapping

pub mod collection;
pub mod model;

pub use collection::ModelCollection;
pub use model::{ForestModel, ForestRegressor, PriceModel};
