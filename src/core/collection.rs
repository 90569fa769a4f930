//! Model collection loaded once at process startup
//!
//! Maps asset identifiers (CoinGecko ids like "bitcoin") to their trained
//! models. Read-only after construction; shared across requests via `Arc`
//! with no locking.

use crate::core::model::{ForestModel, ForestRegressor, PriceModel};
use crate::{ForecastError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// On-disk artifact layout: asset id -> serialized regressor
type PersistedModels = HashMap<String, ForestRegressor>;

/// Read-only mapping from asset identifier to its price model
pub struct ModelCollection {
    models: HashMap<String, Box<dyn PriceModel>>,
}

impl std::fmt::Debug for ModelCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCollection")
            .field("models", &self.models.len())
            .finish()
    }
}

impl ModelCollection {
    /// Collection with no models; every asset takes the heuristic path
    pub fn empty() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    /// Load the collection from the persisted artifact
    ///
    /// A missing artifact is not an error: the service degrades to
    /// heuristic-only predictions. An unreadable or unparseable artifact is.
    pub fn load(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Model artifact not found at {:?}. Using heuristic predictions.",
                    path
                );
                return Ok(Self::empty());
            }
            Err(e) => return Err(ForecastError::Io(e)),
        };

        let persisted: PersistedModels = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ForecastError::Model(format!("Failed to deserialize model artifact: {}", e)))?;

        let mut collection = Self::empty();
        for (asset_id, regressor) in persisted {
            collection.insert(asset_id, Box::new(ForestModel::new(regressor)));
        }

        info!(
            "Loaded {} models from artifact {:?}",
            collection.len(),
            path
        );
        Ok(collection)
    }

    /// Register a model for an asset
    pub fn insert(&mut self, asset_id: impl Into<String>, model: Box<dyn PriceModel>) {
        self.models.insert(asset_id.into(), model);
    }

    /// Look up the model for an asset, if one was trained
    pub fn get(&self, asset_id: &str) -> Option<&dyn PriceModel> {
        self.models.get(asset_id).map(|model| model.as_ref())
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.models.contains_key(asset_id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fit_constant_forest, FixedModel};
    use std::io::Write;

    #[test]
    fn test_missing_artifact_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_artifact.json");

        let collection = ModelCollection::load(&path).unwrap();
        assert!(collection.is_empty());
        assert!(collection.get("bitcoin").is_none());
    }

    #[test]
    fn test_corrupt_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crypto_forecast_models.json");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"not json at all").unwrap();

        let err = ModelCollection::load(&path).unwrap_err();
        assert!(matches!(err, ForecastError::Model(_)));
    }

    #[test]
    fn test_load_artifact_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crypto_forecast_models.json");

        let mut persisted = PersistedModels::new();
        persisted.insert("ethereum".to_string(), fit_constant_forest(3100.0));
        let mut file = File::create(&path).unwrap();
        serde_json::to_writer(&mut file, &persisted).unwrap();

        let collection = ModelCollection::load(&path).unwrap();
        assert_eq!(collection.len(), 1);
        assert!(collection.contains("ethereum"));
        assert!(!collection.contains("bitcoin"));

        let model = collection.get("ethereum").unwrap();
        let predicted = model.predict(&[3000.0]).unwrap();
        assert!((predicted - 3100.0).abs() < 1e-9);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut collection = ModelCollection::empty();
        collection.insert("litecoin", Box::new(FixedModel(99.5)));

        assert_eq!(collection.len(), 1);
        let model = collection.get("litecoin").unwrap();
        assert_eq!(model.predict(&[100.0]).unwrap(), 99.5);
    }
}
