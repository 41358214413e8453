//! Network fetch seam.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

use super::request::{CacheKey, FetchRequest, FetchResponse};

// ============================================================================
// Fetcher
// ============================================================================

/// Performs real network requests on behalf of the cache.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a request.
    ///
    /// Non-2xx statuses are responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the request could not complete.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse>;
}

// ============================================================================
// StaticFetcher
// ============================================================================

#[derive(Debug, Default)]
struct StaticRoutes {
    responses: Mutex<FxHashMap<CacheKey, FetchResponse>>,
    offline: AtomicBool,
    calls: AtomicUsize,
}

/// Fetcher answering from a fixed route table.
///
/// Unknown routes yield 404. Clones share routes, so a test can keep a
/// handle after passing one to the cache.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    routes: Arc<StaticRoutes>,
}

impl StaticFetcher {
    /// Creates a fetcher with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the response for a GET of `url`.
    #[must_use]
    pub fn route(self, url: &str, response: FetchResponse) -> Self {
        self.set_route(url, response);
        self
    }

    /// Adds or replaces the response for a GET of `url` in place.
    pub fn set_route(&self, url: &str, response: FetchResponse) {
        let key = CacheKey::from(&FetchRequest::get(url));
        self.routes.responses.lock().insert(key, response);
    }

    /// Makes every subsequent fetch fail with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.routes.offline.store(offline, Ordering::SeqCst);
    }

    /// Returns the number of fetches attempted.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.routes.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse> {
        self.routes.calls.fetch_add(1, Ordering::SeqCst);

        if self.routes.offline.load(Ordering::SeqCst) {
            return Err(Error::network(&request.url, "network unreachable"));
        }

        let key = CacheKey::from(&FetchRequest::get(&request.url));
        let response = self
            .routes
            .responses
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| FetchResponse::new(404, Vec::new()).with_status_text("Not Found"));
        Ok(response)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::{Fetcher, StaticFetcher};
    use crate::cache::{FetchRequest, FetchResponse};
    use crate::error::Error;

    #[tokio::test]
    async fn test_routes_and_misses() {
        let fetcher = StaticFetcher::new().route("https://a.test/", FetchResponse::ok("home"));

        let hit = fetcher
            .fetch(&FetchRequest::get("https://a.test/"))
            .await
            .expect("fetch");
        assert_eq!(hit.text(), "home");

        let miss = fetcher
            .fetch(&FetchRequest::get("https://a.test/missing"))
            .await
            .expect("fetch");
        assert_eq!(miss.status, 404);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_offline_fails() {
        let fetcher = StaticFetcher::new();
        fetcher.set_offline(true);

        let result = fetcher.fetch(&FetchRequest::get("https://a.test/")).await;
        assert!(matches!(result, Err(Error::Network { .. })));
    }
}
