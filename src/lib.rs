//! tabshell - Tab, history and navigation core for an embedded browser shell.
//!
//! This library models the state behind a tabbed browser UI: which tabs are
//! open, what each one has visited, what the address bar shows, and how raw
//! address-bar input becomes a URL. Rendering is delegated to a
//! [`ContentSurface`] supplied by the host.
//!
//! # Architecture
//!
//! Control flows from user input through the [`UrlResolver`] into the
//! [`BrowserSession`], which appends to the tab's history and dispatches the
//! URL to the tab's content surface. State changes are reported to the host
//! through [`SessionEvent`]s.
//!
//! The [`ResourceCache`] sits beside the session and answers outbound content
//! fetches with a stale-while-revalidate policy, independent of which tab
//! issued them.
//!
//! Key design principles:
//!
//! - One [`BrowserSession`] owns all shell state; every mutation goes through
//!   `&mut self` and runs to completion
//! - Load completions re-check that their tab still exists before mutating
//! - Collaborators (surfaces, durable storage, network, cache stores) are traits
//!
//! # Quick Start
//!
//! ```
//! use tabshell::{BrowserSession, Result, SessionEvent};
//!
//! fn main() -> Result<()> {
//!     let mut session = BrowserSession::builder()
//!         .on_event(|event| {
//!             if let SessionEvent::AddressChanged { url } = event {
//!                 println!("address: {url}");
//!             }
//!         })
//!         .build()?;
//!     session.init()?;
//!
//!     session.resolve_and_navigate("example.com")?;
//!     session.resolve_and_navigate("rust ownership")?;
//!
//!     let state = session.go_back();
//!     assert_eq!(state.current_url.as_deref(), Some("https://example.com"));
//!     assert!(state.can_go_forward);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Session, tabs, history, bookmarks, find-in-page |
//! | [`cache`] | Stale-while-revalidate resource cache |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`resolver`] | Address-bar input resolution |
//! | [`storage`] | Durable key-value storage and preferences |

// ============================================================================
// Modules
// ============================================================================

/// Browser shell entities: session, tabs, history.
///
/// This module contains the state machine behind the UI:
///
/// - [`BrowserSession`] - Owner of all shell state
/// - [`Tab`] - One tab with its history
/// - [`Bookmarks`] - Bookmarked pages
pub mod browser;

/// Resource cache.
///
/// Use [`ResourceCache::builder()`] to create a configured cache.
pub mod cache;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for shell entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Address-bar input resolution.
pub mod resolver;

/// Durable key-value storage.
///
/// Holds bookmarks and user preferences across sessions.
pub mod storage;

// ============================================================================
// Re-exports
// ============================================================================

// Browser types
pub use browser::{
    Bookmark, Bookmarks, BrowserSession, ContentSurface, EventHandler, FindReport,
    HeadlessSurface, HeadlessSurfaceFactory, HistoryStack, NavState, SessionBuilder,
    SessionEvent, SessionOptions, SurfaceFactory, Tab, TabRegistry,
};

// Cache types
pub use cache::{
    CacheOptions, CacheOutcome, FetchRequest, FetchResponse, Fetcher, ResourceCache,
    ResponseSource,
};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{GroupId, TabId};

// Resolver types
pub use resolver::{NavigationTarget, SearchEngine, UrlResolver};

// Storage types
pub use storage::{FileStore, KeyValueStore, MemoryStore, Preferences, Theme};
