//! Builder for the resource cache.
//!
//! # Example
//!
//! ```
//! use tabshell::cache::{CacheOptions, ResourceCache, StaticFetcher};
//!
//! # fn example() -> tabshell::Result<()> {
//! let cache = ResourceCache::builder()
//!     .options(CacheOptions::new().with_generation("shell-v2"))
//!     .fetcher(StaticFetcher::new())
//!     .build()?;
//!
//! assert_eq!(cache.generation(), "shell-v2");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

use super::fetcher::Fetcher;
use super::options::CacheOptions;
use super::store::{CacheStorage, MemoryCacheStorage};
use super::worker::ResourceCache;

// ============================================================================
// CacheBuilder
// ============================================================================

/// Builder for a [`ResourceCache`].
///
/// A fetcher is required; storage defaults to [`MemoryCacheStorage`].
#[derive(Default)]
pub struct CacheBuilder {
    options: CacheOptions,
    fetcher: Option<Arc<dyn Fetcher>>,
    storage: Option<Arc<dyn CacheStorage>>,
}

impl fmt::Debug for CacheBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("options", &self.options)
            .field("fetcher", &self.fetcher.is_some())
            .field("storage", &self.storage.is_some())
            .finish()
    }
}

impl CacheBuilder {
    /// Creates a builder with default options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the options.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: CacheOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the generation name.
    #[inline]
    #[must_use]
    pub fn generation(mut self, generation: impl Into<String>) -> Self {
        self.options.generation = generation.into();
        self
    }

    /// Sets the precache origin.
    #[inline]
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.options.origin = origin.into();
        self
    }

    /// Replaces the precache list.
    #[inline]
    #[must_use]
    pub fn precache<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_precache(paths);
        self
    }

    /// Sets the network fetcher.
    #[inline]
    #[must_use]
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Sets the cache storage.
    #[inline]
    #[must_use]
    pub fn storage(mut self, storage: impl CacheStorage + 'static) -> Self {
        self.storage = Some(Arc::new(storage));
        self
    }

    /// Builds the cache with validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no fetcher was set or the options are invalid.
    pub fn build(self) -> Result<ResourceCache> {
        let origin = self.options.validate()?;
        let fetcher = self
            .fetcher
            .ok_or_else(|| Error::config("a fetcher is required"))?;
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryCacheStorage::new()));

        Ok(ResourceCache::from_parts(self.options, origin, fetcher, storage))
    }
}

// ============================================================================
// Tests
// ============================================================================
