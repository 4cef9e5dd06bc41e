//! The dataset registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use hyperquery_common::{ConfigError, DatasetKey};
use hyperquery_hypergraph::{HypergraphError, HypergraphStore};
use thiserror::Error;
use tracing::debug;

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The dataset could not be loaded
    #[error("Dataset loading error: {0}")]
    Load(#[from] HypergraphError),
    /// The generation config is unusable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The root or output directory could not be resolved or created
    #[error("Failed to {op} {}: {source}", .path.display())]
    Io {
        /// Operation that failed, e.g. `create`
        op: &'static str,
        /// Directory the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Owns the loaded datasets of a run.
///
/// Stores are immutable once built, so a cached store is handed out as an
/// `Arc` and shared by every task that samples from it.
#[derive(Debug, Clone)]
pub struct Driver {
    /// Loaded stores by dataset
    registry: Arc<RwLock<HashMap<DatasetKey, Arc<HypergraphStore>>>>,
    /// Canonical dataset root
    root_path: PathBuf,
}

impl Driver {
    /// Creates a driver for datasets stored under `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, DriverError> {
        let root = root.as_ref();
        let root_path = std::fs::canonicalize(root).map_err(|source| DriverError::Io {
            op: "resolve",
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Self {
            registry: Arc::new(RwLock::new(HashMap::new())),
            root_path,
        })
    }

    /// Canonical directory holding the datasets.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Key of the dataset `name` under this driver's root.
    pub fn dataset(&self, name: &str) -> DatasetKey {
        DatasetKey::new(&self.root_path, name)
    }

    /// Get a store from the registry, loading it if necessary
    pub fn get_or_load(&self, key: &DatasetKey) -> Result<Arc<HypergraphStore>, DriverError> {
        if let Some(store) = self.get(key) {
            debug!("Dataset {} already loaded", key.name());
            return Ok(store);
        }

        let store = Arc::new(HypergraphStore::load(key)?);

        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have finished loading first; keep its copy.
        let store = registry.entry(key.clone()).or_insert(store).clone();
        Ok(store)
    }

    /// Get a store from the registry (returns None if not loaded)
    pub fn get(&self, key: &DatasetKey) -> Option<Arc<HypergraphStore>> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry.get(key).cloned()
    }

    /// Drops a cached store. Tasks still holding it keep their copy.
    pub fn unload(&self, key: &DatasetKey) -> Option<Arc<HypergraphStore>> {
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        registry.remove(key)
    }

    /// Keys of every cached store.
    pub fn loaded_datasets(&self) -> Vec<DatasetKey> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry.keys().cloned().collect()
    }
}
