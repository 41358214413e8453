//! Request and response records.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

// ============================================================================
// Constants
// ============================================================================

/// Body served when the network fails and nothing is cached.
pub const OFFLINE_HTML: &str = "<h1>Offline</h1><p>You are currently offline.</p>";

// ============================================================================
// FetchRequest
// ============================================================================

/// An outbound content request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchRequest {
    /// HTTP method.
    pub method: String,

    /// Absolute URL.
    pub url: String,
}

impl FetchRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Returns `true` if the request may be served from or stored in the cache.
    ///
    /// Only GET requests to http(s) URLs qualify.
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
            && Url::parse(&self.url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
    }
}

// ============================================================================
// CacheKey
// ============================================================================

/// Normalized request descriptor used as a cache key.
///
/// The method is upper-cased and the URL fragment dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey {
    method: String,
    url: String,
}

impl CacheKey {
    /// Returns the normalized method.
    #[inline]
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the normalized URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl From<&FetchRequest> for CacheKey {
    fn from(request: &FetchRequest) -> Self {
        let url = match Url::parse(&request.url) {
            Ok(mut parsed) => {
                parsed.set_fragment(None);
                parsed.to_string()
            }
            Err(_) => request.url.clone(),
        };
        Self {
            method: request.method.to_ascii_uppercase(),
            url,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

// ============================================================================
// ResponseType
// ============================================================================

/// Origin classification of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Same-origin response.
    #[default]
    Basic,

    /// Cross-origin response with CORS headers.
    Cors,

    /// Synthesized locally.
    Default,

    /// Network error.
    Error,

    /// Cross-origin response without CORS; contents hidden.
    Opaque,
}

// ============================================================================
// FetchResponse
// ============================================================================

/// A response, cached or fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,

    /// HTTP status text.
    pub status_text: String,

    /// Origin classification.
    pub response_type: ResponseType,

    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,

    /// Body bytes.
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Creates a same-origin response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: String::new(),
            response_type: ResponseType::Basic,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Creates a same-origin 200 response.
    #[must_use]
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body).with_status_text("OK")
    }

    /// Creates the offline placeholder document.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            response_type: ResponseType::Default,
            ..Self::ok(OFFLINE_HTML)
        }
        .with_header("Content-Type", "text/html")
    }

    /// Sets the status text.
    #[must_use]
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    /// Sets the response type.
    #[must_use]
    pub fn with_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns a header value, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` for 2xx statuses.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns `true` if a cache miss may store this response.
    ///
    /// Requires status 200 and a same-origin response.
    #[inline]
    #[must_use]
    pub fn is_storable(&self) -> bool {
        self.status == 200 && self.response_type == ResponseType::Basic
    }

    /// Returns the body as UTF-8 text, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::{CacheKey, FetchRequest, FetchResponse, OFFLINE_HTML, ResponseType};

    #[test]
    fn test_cacheable_requests() {
        assert!(FetchRequest::get("https://a.test/x").is_cacheable());
        assert!(FetchRequest::new("get", "http://a.test/").is_cacheable());
        assert!(!FetchRequest::new("POST", "https://a.test/x").is_cacheable());
        assert!(!FetchRequest::get("chrome-extension://abc/x.js").is_cacheable());
        assert!(!FetchRequest::get("/relative").is_cacheable());
    }

    #[test]
    fn test_key_normalization() {
        let a = CacheKey::from(&FetchRequest::new("get", "https://A.test/page#top"));
        let b = CacheKey::from(&FetchRequest::get("https://a.test/page"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "GET https://a.test/page");
    }

    #[test]
    fn test_offline_placeholder() {
        let response = FetchResponse::offline();
        assert_eq!(response.text(), OFFLINE_HTML);
        assert_eq!(response.header("content-type"), Some("text/html"));
        assert!(!response.is_storable());
    }

    #[test]
    fn test_storable_requires_basic_200() {
        assert!(FetchResponse::ok("x").is_storable());
        assert!(!FetchResponse::new(204, "").is_storable());
        assert!(!FetchResponse::ok("x").with_type(ResponseType::Cors).is_storable());
        assert!(FetchResponse::new(204, "").is_success());
    }
}
