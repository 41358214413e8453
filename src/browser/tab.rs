//! Domain model of a tab.
//!
//! A [`Tab`] holds identity, history and pin/group flags. Its content
//! surface lives in the session, keyed by the same [`TabId`], so the domain
//! object never touches presentation.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use crate::identifiers::{GroupId, TabId};

use super::history::HistoryStack;

// ============================================================================
// Constants
// ============================================================================

/// URL of an empty document.
pub const BLANK_URL: &str = "about:blank";

/// Label of a tab opened on [`BLANK_URL`].
pub const NEW_TAB_LABEL: &str = "New Tab";

/// Label of a tab whose first load has not completed.
pub const LOADING_LABEL: &str = "Loading...";

// ============================================================================
// Tab
// ============================================================================

/// A tab in the registry.
#[derive(Clone)]
pub struct Tab {
    /// Tab ID.
    id: TabId,
    /// Navigation history.
    pub(crate) history: HistoryStack,
    /// Whether the tab is pinned.
    pub(crate) pinned: bool,
    /// Group membership.
    pub(crate) group_id: Option<GroupId>,
    /// Display label (title or URL).
    pub(crate) label: String,
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("pinned", &self.pinned)
            .field("group_id", &self.group_id)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl Tab {
    /// Creates a tab.
    pub(crate) fn new(
        id: TabId,
        initial_url: &str,
        history: HistoryStack,
        pinned: bool,
        group_id: Option<GroupId>,
    ) -> Self {
        let label = if initial_url == BLANK_URL {
            NEW_TAB_LABEL
        } else {
            LOADING_LABEL
        };

        Self {
            id,
            history,
            pinned,
            group_id,
            label: label.to_string(),
        }
    }
}

// ============================================================================
// Tab - Accessors
// ============================================================================

impl Tab {
    /// Returns the tab ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TabId {
        self.id
    }

    /// Returns the navigation history.
    #[inline]
    #[must_use]
    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Returns `true` if the tab is pinned.
    #[inline]
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Returns `true` if the close affordance should be shown.
    ///
    /// Pinned tabs hide it.
    #[inline]
    #[must_use]
    pub fn is_closable(&self) -> bool {
        !self.pinned
    }

    /// Returns the group the tab belongs to.
    #[inline]
    #[must_use]
    pub fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    /// Returns the display label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the URL under the history cursor.
    #[inline]
    #[must_use]
    pub fn current_url(&self) -> Option<&str> {
        self.history.current()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::{BLANK_URL, LOADING_LABEL, NEW_TAB_LABEL, Tab};
    use crate::browser::HistoryStack;
    use crate::identifiers::TabId;

    #[test]
    fn test_blank_tab_label() {
        let tab = Tab::new(TabId::generate(), BLANK_URL, HistoryStack::new(5), false, None);
        assert_eq!(tab.label(), NEW_TAB_LABEL);
        assert!(tab.is_closable());
    }

    #[test]
    fn test_loading_label_and_pinned() {
        let tab = Tab::new(
            TabId::generate(),
            "https://example.com",
            HistoryStack::new(5),
            true,
            None,
        );
        assert_eq!(tab.label(), LOADING_LABEL);
        assert!(!tab.is_closable());
    }

    #[test]
    fn test_tab_is_debug() {
        fn assert_debug<T: std::fmt::Debug>() {}
        assert_debug::<Tab>();
    }
}
