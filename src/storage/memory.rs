//! In-memory key-value store.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::Result;

use super::KeyValueStore;

// ============================================================================
// MemoryStore
// ============================================================================

#[derive(Debug, Default)]
struct Inner {
    values: FxHashMap<String, String>,
    writes: usize,
}

/// Key-value store held in memory.
///
/// Clones share contents. Every `set` and `remove` is counted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of mutating calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    /// Returns a stored value without going through the trait.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.inner.lock().values.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.lock().values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.values.remove(key);
        inner.writes += 1;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
