//! Generation-scoped cache stores.
//!
//! A [`CacheStorage`] holds named generations; each generation is a
//! [`GenerationCache`] mapping [`CacheKey`]s to responses.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::Result;

use super::request::{CacheKey, FetchResponse};

// ============================================================================
// Traits
// ============================================================================

/// Store of named cache generations.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Opens a generation, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Cache`] if the backend fails.
    async fn open(&self, generation: &str) -> Result<Arc<dyn GenerationCache>>;

    /// Lists generation names.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Cache`] if the backend fails.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Deletes a generation. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Cache`] if the backend fails.
    async fn delete(&self, generation: &str) -> Result<bool>;
}

/// One cache generation.
#[async_trait]
pub trait GenerationCache: Send + Sync {
    /// Looks up a response.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Cache`] if the backend fails.
    async fn get(&self, key: &CacheKey) -> Result<Option<FetchResponse>>;

    /// Stores a response, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Cache`] if the backend fails.
    async fn put(&self, key: CacheKey, response: FetchResponse) -> Result<()>;

    /// Lists stored keys.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Cache`] if the backend fails.
    async fn keys(&self) -> Result<Vec<CacheKey>>;
}

// ============================================================================
// MemoryGenerationCache
// ============================================================================

/// Generation held in memory.
#[derive(Debug, Default)]
pub struct MemoryGenerationCache {
    entries: Mutex<FxHashMap<CacheKey, FetchResponse>>,
}

#[async_trait]
impl GenerationCache for MemoryGenerationCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<FetchResponse>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn put(&self, key: CacheKey, response: FetchResponse) -> Result<()> {
        trace!(key = %key, status = response.status, "Cache put");
        self.entries.lock().insert(key, response);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<CacheKey>> {
        let mut keys: Vec<CacheKey> = self.entries.lock().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

// ============================================================================
// MemoryCacheStorage
// ============================================================================

/// Cache storage held in memory.
///
/// Clones share generations.
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStorage {
    generations: Arc<Mutex<FxHashMap<String, Arc<MemoryGenerationCache>>>>,
}

impl MemoryCacheStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    async fn open(&self, generation: &str) -> Result<Arc<dyn GenerationCache>> {
        let cache = Arc::clone(
            self.generations
                .lock()
                .entry(generation.to_string())
                .or_default(),
        );
        Ok(cache)
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.generations.lock().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn delete(&self, generation: &str) -> Result<bool> {
        Ok(self.generations.lock().remove(generation).is_some())
    }
}

// ============================================================================
// Tests
// ============================================================================
