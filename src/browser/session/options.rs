//! Session configuration.
//!
//! # Example
//!
//! ```
//! use tabshell::browser::SessionOptions;
//! use tabshell::resolver::SearchEngine;
//!
//! let options = SessionOptions::new()
//!     .with_max_tabs(8)
//!     .with_search_engine(SearchEngine::DuckDuckGo)
//!     .with_initial_url("https://example.com");
//!
//! assert!(options.validate().is_ok());
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use url::Url;

use crate::browser::history::MAX_HISTORY_ENTRIES;
use crate::browser::registry::MAX_TABS;
use crate::browser::tab::BLANK_URL;
use crate::error::{Error, Result};
use crate::resolver::{SearchEngine, encode_uri_component};

// ============================================================================
// SessionOptions
// ============================================================================

/// Session configuration.
///
/// Deserializes from JSON with every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionOptions {
    /// Maximum number of open tabs.
    pub max_tabs: usize,

    /// Maximum history entries per tab.
    pub max_history_entries: usize,

    /// Search engine used until the user picks one.
    pub default_search_engine: SearchEngine,

    /// Endpoint that loads are routed through.
    pub proxy_endpoint: Option<String>,

    /// URL of the tab opened on startup.
    pub initial_url: Option<String>,
}

// ============================================================================
// Constructors
// ============================================================================

impl SessionOptions {
    /// Creates options with default limits.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_tabs: MAX_TABS,
            max_history_entries: MAX_HISTORY_ENTRIES,
            default_search_engine: SearchEngine::Brave,
            proxy_endpoint: None,
            initial_url: None,
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl SessionOptions {
    /// Sets the tab limit.
    #[inline]
    #[must_use]
    pub fn with_max_tabs(mut self, max_tabs: usize) -> Self {
        self.max_tabs = max_tabs;
        self
    }

    /// Sets the per-tab history bound.
    #[inline]
    #[must_use]
    pub fn with_max_history_entries(mut self, max_history_entries: usize) -> Self {
        self.max_history_entries = max_history_entries;
        self
    }

    /// Sets the default search engine.
    #[inline]
    #[must_use]
    pub fn with_search_engine(mut self, engine: SearchEngine) -> Self {
        self.default_search_engine = engine;
        self
    }

    /// Routes loads through a proxy endpoint.
    #[inline]
    #[must_use]
    pub fn with_proxy_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.proxy_endpoint = Some(endpoint.into());
        self
    }

    /// Sets the URL opened on startup.
    #[inline]
    #[must_use]
    pub fn with_initial_url(mut self, url: impl Into<String>) -> Self {
        self.initial_url = Some(url.into());
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl SessionOptions {
    /// Checks that the options describe a usable session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for zero limits or an unparsable proxy endpoint.
    pub fn validate(&self) -> Result<()> {
        if self.max_tabs == 0 {
            return Err(Error::config("max_tabs must be at least 1"));
        }

        if self.max_history_entries == 0 {
            return Err(Error::config("max_history_entries must be at least 1"));
        }

        if let Some(endpoint) = &self.proxy_endpoint {
            let parsed = Url::parse(endpoint).map_err(|e| {
                Error::config(format!("Invalid proxy endpoint '{endpoint}': {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https" | "ws" | "wss") {
                return Err(Error::config(format!(
                    "Proxy endpoint must use http(s) or ws(s): {endpoint}"
                )));
            }
        }

        Ok(())
    }

    /// Returns the URL actually handed to a content surface.
    ///
    /// With a proxy endpoint this is `{endpoint}?url={encoded}`; otherwise
    /// the URL itself.
    #[must_use]
    pub fn dispatch_url(&self, url: &str) -> String {
        match &self.proxy_endpoint {
            Some(endpoint) if url != BLANK_URL => {
                format!("{endpoint}?url={}", encode_uri_component(url))
            }
            _ => url.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::SessionOptions;
    use crate::resolver::SearchEngine;

    #[test]
    fn test_defaults() {
        let options = SessionOptions::default();
        assert_eq!(options.max_tabs, 20);
        assert_eq!(options.max_history_entries, 100);
        assert_eq!(options.default_search_engine, SearchEngine::Brave);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(SessionOptions::new().with_max_tabs(0).validate().is_err());
        assert!(
            SessionOptions::new()
                .with_max_history_entries(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_bad_proxy_rejected() {
        let options = SessionOptions::new().with_proxy_endpoint("not a url");
        assert!(options.validate().is_err());

        let options = SessionOptions::new().with_proxy_endpoint("ftp://proxy.test");
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_dispatch_url_through_proxy() {
        let options = SessionOptions::new().with_proxy_endpoint("wss://proxy.test/p");
        assert_eq!(
            options.dispatch_url("https://example.com/a b"),
            "wss://proxy.test/p?url=https%3A%2F%2Fexample.com%2Fa%20b"
        );
        assert_eq!(options.dispatch_url("about:blank"), "about:blank");
        assert_eq!(
            SessionOptions::new().dispatch_url("https://example.com"),
            "https://example.com"
        );
    }

    #[test]
    fn test_deserialize_partial_json() {
        let options: SessionOptions =
            serde_json::from_str(r#"{"maxTabs": 3, "defaultSearchEngine": "google"}"#)
                .expect("parse");
        assert_eq!(options.max_tabs, 3);
        assert_eq!(options.max_history_entries, 100);
        assert_eq!(options.default_search_engine, SearchEngine::Google);
    }
}
