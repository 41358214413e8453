//! Resource cache.
//!
//! Intercepts outbound content fetches independently of which tab issued
//! them:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ResourceCache`] | Stale-while-revalidate request handler |
//! | [`CacheStorage`] | Named generations of cached responses |
//! | [`Fetcher`] | Real network access |
//! | [`CacheKey`] | Normalized method + URL |
//!
//! # Example
//!
//! ```
//! use tabshell::cache::{FetchRequest, FetchResponse, ResourceCache, ResponseSource, StaticFetcher};
//!
//! # async fn example() -> tabshell::Result<()> {
//! let fetcher = StaticFetcher::new().route("https://example.com/", FetchResponse::ok("hello"));
//! let cache = ResourceCache::builder().fetcher(fetcher).build()?;
//!
//! let first = cache.handle_fetch(&FetchRequest::get("https://example.com/")).await?;
//! assert_eq!(first.source, ResponseSource::Network);
//!
//! let second = cache.handle_fetch(&FetchRequest::get("https://example.com/")).await?;
//! assert_eq!(second.source, ResponseSource::Cache);
//! cache.settle().await?;
//! # Ok(())
//! # }
//! # tokio_test::block_on(example()).unwrap();
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Cache builder.
pub mod builder;

/// Network seam.
pub mod fetcher;

/// Cache configuration.
pub mod options;

/// Request and response records.
pub mod request;

/// Generation stores.
pub mod store;

/// Request handling.
pub mod worker;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CacheBuilder;
pub use fetcher::{Fetcher, StaticFetcher};
pub use options::{CacheOptions, DEFAULT_GENERATION, DEFAULT_PRECACHE};
pub use request::{CacheKey, FetchRequest, FetchResponse, OFFLINE_HTML, ResponseType};
pub use store::{CacheStorage, GenerationCache, MemoryCacheStorage, MemoryGenerationCache};
pub use worker::{CacheOutcome, ResourceCache, ResponseSource};
