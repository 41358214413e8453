//! Error types for tabshell.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use tabshell::{Result, Error};
//!
//! fn example(session: &mut BrowserSession) -> Result<()> {
//!     let tab_id = session.create_tab("about:blank")?;
//!     session.switch_tab(tab_id);
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Tabs | [`Error::CapacityExceeded`], [`Error::TabNotFound`] |
//! | Navigation | [`Error::InvalidTarget`], [`Error::LoadFailure`], [`Error::CrossOriginRestricted`] |
//! | Storage | [`Error::StorageCorrupt`], [`Error::Storage`] |
//! | Cache | [`Error::Network`], [`Error::Cache`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::Join`] |
//!
//! # Propagation
//!
//! Only [`Error::CapacityExceeded`], [`Error::TabNotFound`] and
//! [`Error::Config`] are returned from the session's public surface. The
//! remaining kinds are produced by collaborators and converted into a local
//! fallback (placeholder document, raw URL, empty state) where they occur.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio::task::JoinError;

use crate::identifiers::TabId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when session or cache options are invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Tab Errors
    // ========================================================================
    /// Tab capacity reached.
    ///
    /// Returned when a tab is created while the registry is full.
    #[error("Maximum number of tabs reached ({limit})")]
    CapacityExceeded {
        /// The configured tab limit.
        limit: usize,
    },

    /// Tab not found.
    ///
    /// Returned when a tab ID does not exist in the registry.
    #[error("Tab not found: {tab_id}")]
    TabNotFound {
        /// The missing tab ID.
        tab_id: TabId,
    },

    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// Input is not a navigable URL.
    ///
    /// The resolver treats this as a search query.
    #[error("Invalid navigation target: {input}")]
    InvalidTarget {
        /// The rejected input.
        input: String,
    },

    /// Content surface failed to load a URL.
    #[error("Failed to load {url}: {message}")]
    LoadFailure {
        /// URL that failed to load.
        url: String,
        /// Description of the failure.
        message: String,
    },

    /// Cross-origin content could not be read.
    ///
    /// Callers degrade to the raw URL instead.
    #[error("Cross-origin access denied: {operation}")]
    CrossOriginRestricted {
        /// The operation that was denied.
        operation: String,
    },

    // ========================================================================
    // Storage Errors
    // ========================================================================
    /// Persisted data could not be parsed.
    ///
    /// Recovered by discarding the key and resetting to empty state.
    #[error("Corrupt stored data under '{key}': {message}")]
    StorageCorrupt {
        /// Storage key holding the corrupt value.
        key: String,
        /// Description of the parse failure.
        message: String,
    },

    /// Key-value storage backend failure.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure.
        message: String,
    },

    // ========================================================================
    // Cache Errors
    // ========================================================================
    /// Network fetch failed.
    #[error("Network error for {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Description of the transport failure.
        message: String,
    },

    /// Cache store failure.
    #[error("Cache error: {message}")]
    Cache {
        /// Description of the cache failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Background task failed to complete.
    #[error("Task join error: {0}")]
    Join(#[from] JoinError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a capacity exceeded error.
    #[inline]
    pub fn capacity_exceeded(limit: usize) -> Self {
        Self::CapacityExceeded { limit }
    }

    /// Creates a tab not found error.
    #[inline]
    pub fn tab_not_found(tab_id: TabId) -> Self {
        Self::TabNotFound { tab_id }
    }

    /// Creates an invalid target error.
    #[inline]
    pub fn invalid_target(input: impl Into<String>) -> Self {
        Self::InvalidTarget {
            input: input.into(),
        }
    }

    /// Creates a load failure error.
    #[inline]
    pub fn load_failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LoadFailure {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a cross-origin restriction error.
    #[inline]
    pub fn cross_origin(operation: impl Into<String>) -> Self {
        Self::CrossOriginRestricted {
            operation: operation.into(),
        }
    }

    /// Creates a corrupt storage error.
    #[inline]
    pub fn storage_corrupt(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StorageCorrupt {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a storage error.
    #[inline]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[inline]
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a cache error.
    #[inline]
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a storage error.
    #[inline]
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::StorageCorrupt { .. } | Self::Storage { .. } | Self::Io(_) | Self::Json(_)
        )
    }

    /// Returns `true` if the error should be shown to the user as a notice.
    ///
    /// Everything else is rendered as inline placeholder content or logged.
    #[inline]
    #[must_use]
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors have a local fallback and never abort an operation.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidTarget { .. }
                | Self::LoadFailure { .. }
                | Self::CrossOriginRestricted { .. }
                | Self::StorageCorrupt { .. }
                | Self::Network { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
