//! Builder pattern for session configuration.
//!
//! # Example
//!
//! ```
//! use tabshell::browser::{BrowserSession, HeadlessSurfaceFactory, SessionOptions};
//! use tabshell::storage::MemoryStore;
//!
//! # fn example() -> tabshell::Result<()> {
//! let mut session = BrowserSession::builder()
//!     .options(SessionOptions::new().with_max_tabs(5))
//!     .store(MemoryStore::new())
//!     .surface_factory(HeadlessSurfaceFactory::new())
//!     .build()?;
//!
//! session.init()?;
//! assert_eq!(session.tab_count(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use crate::browser::events::{EventHandler, SessionEvent};
use crate::browser::surface::{HeadlessSurfaceFactory, SurfaceFactory};
use crate::error::Result;
use crate::storage::{KeyValueStore, MemoryStore};

use super::BrowserSession;
use super::options::SessionOptions;

// ============================================================================
// SessionBuilder
// ============================================================================

/// Builder for a [`BrowserSession`].
///
/// Unset collaborators default to an in-memory store and headless surfaces.
#[derive(Default)]
pub struct SessionBuilder {
    /// Configuration.
    options: SessionOptions,
    /// Durable storage.
    store: Option<Box<dyn KeyValueStore>>,
    /// Surface factory.
    factory: Option<Box<dyn SurfaceFactory>>,
    /// Event callback.
    handler: Option<EventHandler>,
}

impl fmt::Debug for SessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBuilder")
            .field("options", &self.options)
            .field("store", &self.store.is_some())
            .field("factory", &self.factory.is_some())
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

// ============================================================================
// SessionBuilder Implementation
// ============================================================================

impl SessionBuilder {
    /// Creates a builder with default options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the options.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the durable store.
    #[inline]
    #[must_use]
    pub fn store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Sets the surface factory.
    #[inline]
    #[must_use]
    pub fn surface_factory(mut self, factory: impl SurfaceFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Sets the event callback.
    #[inline]
    #[must_use]
    pub fn on_event<F>(mut self, handler: F) -> Self
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Builds the session with validation.
    ///
    /// The session is not initialized; call [`BrowserSession::init`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the options are invalid.
    pub fn build(self) -> Result<BrowserSession> {
        self.options.validate()?;

        let store = self
            .store
            .unwrap_or_else(|| Box::new(MemoryStore::new()));
        let factory = self
            .factory
            .unwrap_or_else(|| Box::new(HeadlessSurfaceFactory::new()));

        Ok(BrowserSession::from_parts(
            self.options,
            store,
            factory,
            self.handler,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::SessionBuilder;
    use crate::browser::SessionOptions;
    use crate::error::Error;

    #[test]
    fn test_build_with_defaults() {
        let session = SessionBuilder::new().build().expect("build");
        assert!(!session.is_initialized());
        assert_eq!(session.tab_count(), 0);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let result = SessionBuilder::new()
            .options(SessionOptions::new().with_max_tabs(0))
            .build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_debug_hides_collaborators() {
        let builder = SessionBuilder::new().on_event(|_| {});
        let debug = format!("{builder:?}");
        assert!(debug.contains("handler: true"));
    }
}
