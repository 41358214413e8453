//! URL resolution for address-bar input.
//!
//! Classifies user input as a navigable URL or a search query. The
//! classification is purely syntactic; nothing is fetched.
//!
//! | Input | Result |
//! |-------|--------|
//! | `https://example.com/a` | Direct, unchanged |
//! | `example.com` | `https://example.com` |
//! | `hello world` | Search engine URL with the encoded query |
//! | empty / whitespace | `None` (no navigation) |
//!
//! # Example
//!
//! ```
//! use tabshell::resolver::{SearchEngine, TargetKind, UrlResolver};
//!
//! let resolver = UrlResolver::new(SearchEngine::Brave);
//! let target = resolver.resolve("example.com").unwrap();
//! assert_eq!(target.url, "https://example.com");
//! assert_eq!(target.kind, TargetKind::SchemeAdded);
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Search engine definitions.
pub mod engine;

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Re-exports
// ============================================================================

pub use engine::{SearchEngine, encode_uri_component};

// ============================================================================
// Constants
// ============================================================================

/// Scheme prepended to host-like input.
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Permissive host/path pattern a navigable URL must match.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/0-9A-Za-z_ .-]*)*/?$")
        .expect("url pattern regex")
});

// ============================================================================
// NavigationTarget
// ============================================================================

/// How a navigation target was derived from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Input was already an http(s) URL.
    Direct,

    /// Input was host-like; `https://` was prepended.
    SchemeAdded,

    /// Input was treated as a search query.
    Search(SearchEngine),
}

/// A resolved, scheme-qualified URL ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    /// URL to load.
    pub url: String,

    /// How the URL was derived.
    pub kind: TargetKind,
}

impl NavigationTarget {
    /// Returns `true` if the input was turned into a search.
    #[inline]
    #[must_use]
    pub fn is_search(&self) -> bool {
        matches!(self.kind, TargetKind::Search(_))
    }
}

// ============================================================================
// UrlResolver
// ============================================================================

/// Turns address-bar input into a [`NavigationTarget`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlResolver {
    /// Engine used for the search fallback.
    engine: SearchEngine,
}

impl UrlResolver {
    /// Creates a resolver using the given search engine.
    #[inline]
    #[must_use]
    pub fn new(engine: SearchEngine) -> Self {
        Self { engine }
    }

    /// Returns the search engine used for fallbacks.
    #[inline]
    #[must_use]
    pub fn engine(&self) -> SearchEngine {
        self.engine
    }

    /// Resolves raw input.
    ///
    /// Returns `None` for empty input; the caller must not navigate.
    #[must_use]
    pub fn resolve(&self, input: &str) -> Option<NavigationTarget> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let (candidate, kind) = if has_http_scheme(input) {
            (input.to_string(), TargetKind::Direct)
        } else {
            (
                format!("{DEFAULT_SCHEME_PREFIX}{input}"),
                TargetKind::SchemeAdded,
            )
        };

        let target = match validate_url(&candidate) {
            Ok(()) => NavigationTarget {
                url: candidate,
                kind,
            },
            Err(e) => {
                trace!(error = %e, "Falling back to search");
                NavigationTarget {
                    url: self.engine.search_url(input),
                    kind: TargetKind::Search(self.engine),
                }
            }
        };

        trace!(input = %input, url = %target.url, kind = ?target.kind, "Resolved input");
        Some(target)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Returns `true` if input starts with an `http://` or `https://` scheme.
fn has_http_scheme(input: &str) -> bool {
    let lower = input.get(..8).unwrap_or(input).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Checks that a scheme-qualified string is a navigable http(s) URL.
///
/// # Errors
///
/// Returns [`Error::InvalidTarget`] if the string does not parse, has a
/// non-http(s) scheme, or does not match the host/path pattern.
pub fn validate_url(candidate: &str) -> Result<()> {
    let parsed = Url::parse(candidate).map_err(|_| Error::invalid_target(candidate))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::invalid_target(candidate));
    }

    if !URL_PATTERN.is_match(candidate) {
        return Err(Error::invalid_target(candidate));
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
