//! Browser shell entities.
//!
//! This module provides the tab/history/navigation state machine:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BrowserSession`] | Owner of all shell state |
//! | [`TabRegistry`] | Open tabs, display order and selection |
//! | [`Tab`] | One tab's identity, history and flags |
//! | [`HistoryStack`] | Bounded per-tab navigation log |
//! | [`Bookmarks`] | Bookmarked pages |
//! | [`FindSession`] | Find-in-page matches |
//! | [`ContentSurface`] | Host of one tab's document |
//!
//! # Example
//!
//! ```
//! use tabshell::browser::BrowserSession;
//!
//! # fn example() -> tabshell::Result<()> {
//! let mut session = BrowserSession::builder().build()?;
//! session.init()?;
//!
//! let state = session.resolve_and_navigate("example.com")?;
//! assert_eq!(state.current_url.as_deref(), Some("https://example.com"));
//! assert!(!state.can_go_back);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Bookmark collection.
pub mod bookmarks;

/// Events emitted to the UI layer.
pub mod events;

/// Find-in-page.
pub mod find;

/// Per-tab navigation history.
pub mod history;

/// Tab registry.
pub mod registry;

/// Browser session.
pub mod session;

/// Content surfaces.
pub mod surface;

/// Tab domain model.
pub mod tab;

// ============================================================================
// Re-exports
// ============================================================================

pub use bookmarks::{Bookmark, BookmarkToggle, Bookmarks};
pub use events::{EventHandler, NavState, SessionEvent};
pub use find::{FindReport, FindSession, MatchSpan, TextNode, find_matches};
pub use history::{HistoryMove, HistoryStack, MAX_HISTORY_ENTRIES};
pub use registry::{ClosedTab, MAX_TABS, NewTab, TabRegistry};
pub use session::{BrowserSession, ERROR_PAGE_HTML, SessionBuilder, SessionOptions};
pub use surface::{ContentSurface, HeadlessSurface, HeadlessSurfaceFactory, SurfaceFactory};
pub use tab::{BLANK_URL, Tab};
