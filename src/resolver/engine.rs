//! Search engine definitions.
//!
//! The set of engines is fixed. The selected engine is persisted under the
//! `searchEngine` preference key by its lowercase name.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// SearchEngine
// ============================================================================

/// Search engine used when input is not a navigable URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    /// Brave Search.
    #[default]
    Brave,

    /// Google.
    Google,

    /// Yandex.
    Yandex,

    /// DuckDuckGo.
    #[serde(rename = "duckduckgo")]
    DuckDuckGo,
}

// ============================================================================
// SearchEngine - Implementation
// ============================================================================

impl SearchEngine {
    /// All supported engines, in menu order.
    pub const ALL: [SearchEngine; 4] = [Self::Brave, Self::Google, Self::Yandex, Self::DuckDuckGo];

    /// Returns the persisted name of the engine.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brave => "brave",
            Self::Google => "google",
            Self::Yandex => "yandex",
            Self::DuckDuckGo => "duckduckgo",
        }
    }

    /// Returns the query template; the encoded query is appended to it.
    #[inline]
    #[must_use]
    pub fn template(&self) -> &'static str {
        match self {
            Self::Brave => "https://search.brave.com/search?q=",
            Self::Google => "https://www.google.com/search?q=",
            Self::Yandex => "https://yandex.com/search/?text=",
            Self::DuckDuckGo => "https://duckduckgo.com/?q=",
        }
    }

    /// Builds the search URL for a raw query.
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        format!("{}{}", self.template(), encode_uri_component(query))
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchEngine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|engine| engine.as_str() == s)
            .ok_or_else(|| Error::config(format!("Unknown search engine: {s}")))
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Percent-encodes a query component.
///
/// Matches the browser's `encodeURIComponent`, which leaves `!'()*`
/// unescaped in addition to the RFC 3986 unreserved set.
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    urlencoding::encode(input)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::{SearchEngine, encode_uri_component};

    #[test]
    fn test_default_is_brave() {
        assert_eq!(SearchEngine::default(), SearchEngine::Brave);
    }

    #[test]
    fn test_parse_known_names() {
        for engine in SearchEngine::ALL {
            assert_eq!(engine.as_str().parse::<SearchEngine>().ok(), Some(engine));
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        assert!("altavista".parse::<SearchEngine>().is_err());
    }

    #[test]
    fn test_serde_names_match_as_str() {
        let json = serde_json::to_string(&SearchEngine::DuckDuckGo).expect("serialize");
        assert_eq!(json, "\"duckduckgo\"");
    }

    #[test]
    fn test_search_url() {
        assert_eq!(
            SearchEngine::Google.search_url("hello world"),
            "https://www.google.com/search?q=hello%20world"
        );
    }

    #[test]
    fn test_encode_uri_component_reserved() {
        assert_eq!(encode_uri_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_uri_component("it's (fun)!*"), "it's%20(fun)!*");
    }
}
