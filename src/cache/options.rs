//! Resource cache configuration.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default cache generation name.
pub const DEFAULT_GENERATION: &str = "advanced-browser-cache-v1";

/// Default origin precache paths resolve against.
pub const DEFAULT_ORIGIN: &str = "http://localhost/";

/// Shell assets stored on install.
pub const DEFAULT_PRECACHE: [&str; 6] = [
    "/",
    "/index.html",
    "/style.css",
    "/index.js",
    "/manifest.json",
    "/icon.png",
];

// ============================================================================
// CacheOptions
// ============================================================================

/// Resource cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    /// Name of the current generation.
    pub generation: String,

    /// Origin the precache paths are relative to.
    pub origin: String,

    /// Paths fetched and stored on install.
    pub precache: Vec<String>,
}

impl CacheOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: DEFAULT_GENERATION.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            precache: DEFAULT_PRECACHE.iter().map(ToString::to_string).collect(),
        }
    }

    /// Sets the generation name.
    #[must_use]
    pub fn with_generation(mut self, generation: impl Into<String>) -> Self {
        self.generation = generation.into();
        self
    }

    /// Sets the origin.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Replaces the precache list.
    #[must_use]
    pub fn with_precache<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.precache = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the options and returns the parsed origin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty generation name or a non-http(s)
    /// origin.
    pub fn validate(&self) -> Result<Url> {
        if self.generation.trim().is_empty() {
            return Err(Error::config("cache generation name must not be empty"));
        }

        let origin = Url::parse(&self.origin)
            .map_err(|e| Error::config(format!("Invalid cache origin '{}': {e}", self.origin)))?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Cache origin must be http(s), got '{}'",
                origin.scheme()
            )));
        }

        Ok(origin)
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::{CacheOptions, DEFAULT_GENERATION};

    #[test]
    fn test_defaults() {
        let options = CacheOptions::new();
        assert_eq!(options.generation, DEFAULT_GENERATION);
        assert_eq!(options.precache.len(), 6);
        assert_eq!(
            options.validate().expect("valid").as_str(),
            "http://localhost/"
        );
    }

    #[test]
    fn test_validation_failures() {
        assert!(CacheOptions::new().with_generation("  ").validate().is_err());
        assert!(CacheOptions::new().with_origin("file:///tmp").validate().is_err());
        assert!(CacheOptions::new().with_origin("not a url").validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let options: CacheOptions =
            serde_json::from_str(r#"{"generation":"v2"}"#).expect("deserialize");
        assert_eq!(options.generation, "v2");
        assert_eq!(options.origin, "http://localhost/");
    }
}
