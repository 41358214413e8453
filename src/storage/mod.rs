//! Durable key-value storage.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`KeyValueStore`] | Storage seam used by the session |
//! | [`MemoryStore`] | In-memory store with write accounting |
//! | [`FileStore`] | JSON file store with atomic writes |
//! | [`Preferences`] | Persisted user settings |

// ============================================================================
// Submodules
// ============================================================================

/// JSON file store.
pub mod file;

/// In-memory store.
pub mod memory;

/// Persisted user settings.
pub mod preferences;

// ============================================================================
// Imports
// ============================================================================

use crate::error::Result;

// ============================================================================
// Re-exports
// ============================================================================

pub use file::FileStore;
pub use memory::MemoryStore;
pub use preferences::{Preferences, SEARCH_ENGINE_KEY, THEME_KEY, Theme};

// ============================================================================
// KeyValueStore
// ============================================================================

/// String key-value storage.
///
/// Implementations use interior mutability so a store can be shared with
/// the code that inspects it.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] if the backend fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] if the backend fails.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] if the backend fails.
    fn remove(&self, key: &str) -> Result<()>;
}
