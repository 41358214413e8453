//! Events emitted by the session.
//!
//! The session never touches presentation. It reports every observable
//! change through an [`EventHandler`] that the UI layer binds to.

// ============================================================================
// Imports
// ============================================================================

use crate::identifiers::{GroupId, TabId};
use crate::storage::Theme;

use super::find::FindReport;

// ============================================================================
// Types
// ============================================================================

/// Callback receiving session events.
pub type EventHandler = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Navigation state of the active tab.
///
/// Drives back/forward button enablement and the address bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavState {
    /// Active tab, if any.
    pub active_tab: Option<TabId>,

    /// Whether "back" is enabled.
    pub can_go_back: bool,

    /// Whether "forward" is enabled.
    pub can_go_forward: bool,

    /// URL under the active tab's history cursor.
    pub current_url: Option<String>,
}

// ============================================================================
// SessionEvent
// ============================================================================

/// An observable change in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A tab was added at `position` in display order.
    TabOpened {
        /// New tab.
        tab_id: TabId,
        /// Display position.
        position: usize,
        /// Whether it is pinned.
        pinned: bool,
    },

    /// A tab was removed.
    TabClosed {
        /// Removed tab.
        tab_id: TabId,
    },

    /// The active tab changed.
    ActiveTabChanged {
        /// New active tab, `None` when no tabs remain.
        tab_id: Option<TabId>,
    },

    /// A tab moved after its pin flag flipped.
    TabRelocated {
        /// Moved tab.
        tab_id: TabId,
        /// New display position.
        position: usize,
        /// New pin flag.
        pinned: bool,
    },

    /// A tab's label changed.
    TabLabelChanged {
        /// Relabelled tab.
        tab_id: TabId,
        /// New label.
        label: String,
    },

    /// A tab joined or left a group.
    TabGroupChanged {
        /// Affected tab.
        tab_id: TabId,
        /// New group.
        group_id: Option<GroupId>,
    },

    /// Back/forward enablement or the current URL changed.
    NavigationStateChanged(NavState),

    /// The address bar should show this URL.
    AddressChanged {
        /// URL to display.
        url: String,
    },

    /// A load failed and the error placeholder was rendered.
    LoadFailed {
        /// Tab that failed.
        tab_id: TabId,
        /// URL that failed.
        url: String,
    },

    /// The bookmark icon state for the displayed URL.
    BookmarkStateChanged {
        /// Whether the displayed URL is bookmarked.
        bookmarked: bool,
    },

    /// The bookmark list changed.
    BookmarksChanged,

    /// The combined history changed.
    HistoryChanged,

    /// Find results changed.
    FindUpdated(FindReport),

    /// The theme changed.
    ThemeChanged(Theme),

    /// Tab creation was refused.
    CapacityExceeded {
        /// Configured tab limit.
        limit: usize,
    },
}
