//! Stale-while-revalidate request handling.
//!
//! Cache hits are answered immediately while a tokio task refreshes the
//! stored copy. Misses go to the network and successful same-origin
//! responses are stored before being returned. Network failures with nothing
//! cached produce an offline placeholder that is never stored.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use futures_util::future::join_all;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::error::{Error, Result};

use super::builder::CacheBuilder;
use super::fetcher::Fetcher;
use super::options::CacheOptions;
use super::request::{CacheKey, FetchRequest, FetchResponse};
use super::store::{CacheStorage, GenerationCache};

// ============================================================================
// ResponseSource
// ============================================================================

/// Where a response handed to the caller came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseSource {
    /// Stored copy; a background refresh was started.
    Cache,

    /// Fresh from the network.
    Network,

    /// Synthesized offline placeholder.
    Offline,

    /// Passed straight to the network without touching the cache.
    Bypass,
}

// ============================================================================
// CacheOutcome
// ============================================================================

/// Result of handling one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOutcome {
    /// Response for the caller.
    pub response: FetchResponse,

    /// Origin of the response.
    pub source: ResponseSource,
}

impl CacheOutcome {
    fn new(response: FetchResponse, source: ResponseSource) -> Self {
        Self { response, source }
    }
}

// ============================================================================
// ResourceCache
// ============================================================================

/// Request cache with stale-while-revalidate refresh and generational eviction.
///
/// Share across tasks with `Arc`. Background revalidations need a tokio
/// runtime.
pub struct ResourceCache {
    options: CacheOptions,
    origin: Url,
    fetcher: Arc<dyn Fetcher>,
    storage: Arc<dyn CacheStorage>,
    revalidations: Mutex<Vec<JoinHandle<()>>>,
}

impl fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCache")
            .field("options", &self.options)
            .field("pending_revalidations", &self.pending_revalidations())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl ResourceCache {
    /// Creates a builder.
    #[inline]
    #[must_use]
    pub fn builder() -> CacheBuilder {
        CacheBuilder::new()
    }

    pub(crate) fn from_parts(
        options: CacheOptions,
        origin: Url,
        fetcher: Arc<dyn Fetcher>,
        storage: Arc<dyn CacheStorage>,
    ) -> Self {
        Self {
            options,
            origin,
            fetcher,
            storage,
            revalidations: Mutex::new(Vec::new()),
        }
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl ResourceCache {
    /// Returns the options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Returns the current generation name.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> &str {
        &self.options.generation
    }

    /// Returns the number of revalidations not yet finished.
    #[must_use]
    pub fn pending_revalidations(&self) -> usize {
        self.revalidations
            .lock()
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

impl ResourceCache {
    /// Fetches every precache path and stores the results.
    ///
    /// Nothing is stored unless every fetch succeeds with a 2xx status.
    /// Returns the number of stored entries.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if a path does not resolve against the origin
    /// - [`Error::Network`] if a fetch fails
    /// - [`Error::Cache`] if a response is not 2xx or the store fails
    pub async fn install(&self) -> Result<usize> {
        let requests = self
            .options
            .precache
            .iter()
            .map(|path| {
                self.origin
                    .join(path)
                    .map(|url| FetchRequest::get(url.to_string()))
                    .map_err(|e| Error::config(format!("Invalid precache path '{path}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let responses = join_all(requests.iter().map(|request| self.fetcher.fetch(request))).await;

        let mut entries = Vec::with_capacity(requests.len());
        for (request, response) in requests.iter().zip(responses) {
            let response = response?;
            if !response.is_success() {
                return Err(Error::cache(format!(
                    "Precache of {} returned status {}",
                    request.url, response.status
                )));
            }
            entries.push((CacheKey::from(request), response));
        }

        let cache = self.storage.open(&self.options.generation).await?;
        let count = entries.len();
        for (key, response) in entries {
            cache.put(key, response).await?;
        }

        info!(generation = %self.options.generation, count, "Precache installed");
        Ok(count)
    }

    /// Deletes every generation other than the current one.
    ///
    /// Returns the deleted generation names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if the store fails.
    pub async fn activate(&self) -> Result<Vec<String>> {
        let mut deleted = Vec::new();
        for name in self.storage.keys().await? {
            if name == self.options.generation {
                continue;
            }
            if self.storage.delete(&name).await? {
                debug!(generation = %name, "Deleted stale cache generation");
                deleted.push(name);
            }
        }

        info!(
            generation = %self.options.generation,
            deleted = deleted.len(),
            "Cache generation activated"
        );
        Ok(deleted)
    }

    /// Waits for every started revalidation to finish.
    ///
    /// Returns how many were awaited.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Join`] if a revalidation task panicked.
    pub async fn settle(&self) -> Result<usize> {
        let handles = std::mem::take(&mut *self.revalidations.lock());
        let count = handles.len();

        for result in join_all(handles).await {
            result?;
        }

        Ok(count)
    }
}

// ============================================================================
// Fetch Handling
// ============================================================================

impl ResourceCache {
    /// Answers a request.
    ///
    /// Non-GET and non-http(s) requests go straight to the fetcher.
    ///
    /// # Errors
    ///
    /// - [`Error::Network`] if a bypassed request fails
    /// - [`Error::Cache`] if the generation cannot be opened or read
    pub async fn handle_fetch(&self, request: &FetchRequest) -> Result<CacheOutcome> {
        if !request.is_cacheable() {
            trace!(method = %request.method, url = %request.url, "Cache bypass");
            let response = self.fetcher.fetch(request).await?;
            return Ok(CacheOutcome::new(response, ResponseSource::Bypass));
        }

        let key = CacheKey::from(request);
        let cache = self.storage.open(&self.options.generation).await?;

        if let Some(cached) = cache.get(&key).await? {
            trace!(key = %key, "Cache hit");
            self.spawn_revalidation(cache, key, request.clone());
            return Ok(CacheOutcome::new(cached, ResponseSource::Cache));
        }

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if response.is_storable()
                    && let Err(e) = cache.put(key.clone(), response.clone()).await
                {
                    warn!(key = %key, error = %e, "Failed to store response");
                }
                Ok(CacheOutcome::new(response, ResponseSource::Network))
            }
            Err(e) => {
                debug!(key = %key, error = %e, "Fetch failed, serving offline page");
                Ok(CacheOutcome::new(
                    FetchResponse::offline(),
                    ResponseSource::Offline,
                ))
            }
        }
    }

    fn spawn_revalidation(
        &self,
        cache: Arc<dyn GenerationCache>,
        key: CacheKey,
        request: FetchRequest,
    ) {
        let fetcher = Arc::clone(&self.fetcher);

        let handle = tokio::spawn(async move {
            match fetcher.fetch(&request).await {
                Ok(fresh) if fresh.is_storable() => {
                    if let Err(e) = cache.put(key.clone(), fresh).await {
                        warn!(key = %key, error = %e, "Failed to store revalidated response");
                    } else {
                        trace!(key = %key, "Revalidated");
                    }
                }
                Ok(fresh) => {
                    debug!(
                        key = %key,
                        status = fresh.status,
                        response_type = ?fresh.response_type,
                        "Revalidation kept stored copy"
                    );
                }
                Err(e) => {
                    debug!(key = %key, error = %e, "Revalidation failed");
                }
            }
        });

        let mut pending = self.revalidations.lock();
        pending.retain(|handle| !handle.is_finished());
        pending.push(handle);
    }
}

// ============================================================================
// Tests
// ============================================================================
