//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    config::Config,
    store::{CacheStore, DataStore, MemoryCacheStore, MemoryDataStore, MemoryObjectStore, ObjectStore},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Accounts, profiles and evaluations
    pub data: Arc<dyn DataStore>,

    /// Uploaded documents and videos
    pub objects: Arc<dyn ObjectStore>,

    /// Session revocation and rate-limit counters
    pub cache: Arc<dyn CacheStore>,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        data: Arc<dyn DataStore>,
        objects: Arc<dyn ObjectStore>,
        cache: Arc<dyn CacheStore>,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                data,
                objects,
                cache,
                config,
            }),
        }
    }

    /// State backed entirely by in-memory stores
    pub fn in_memory(config: Config) -> Self {
        let objects = MemoryObjectStore::new(
            config.storage.bucket.clone(),
            config.storage.public_base_url.clone(),
        );
        Self::new(
            Arc::new(MemoryDataStore::new()),
            Arc::new(objects),
            Arc::new(MemoryCacheStore::new()),
            config,
        )
    }

    /// Get a reference to the record store
    pub fn data(&self) -> &dyn DataStore {
        self.inner.data.as_ref()
    }

    /// Get a reference to the object store
    pub fn objects(&self) -> &dyn ObjectStore {
        self.inner.objects.as_ref()
    }

    /// Get a reference to the cache
    pub fn cache(&self) -> &dyn CacheStore {
        self.inner.cache.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
