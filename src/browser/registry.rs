//! Tab registry.
//!
//! Owns the open tabs, their display order and the active selection.
//!
//! Display order keeps every pinned tab ahead of every unpinned tab: pinned
//! tabs enter at the head, unpinned tabs at the tail.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::identifiers::{GroupId, TabId};

use super::history::{HistoryStack, MAX_HISTORY_ENTRIES};
use super::tab::{BLANK_URL, Tab};

// ============================================================================
// Constants
// ============================================================================

/// Default maximum number of open tabs.
pub const MAX_TABS: usize = 20;

// ============================================================================
// NewTab
// ============================================================================

/// Parameters for creating a tab.
///
/// # Example
///
/// ```
/// use tabshell::browser::NewTab;
///
/// let params = NewTab::new("https://example.com").pinned(true);
/// assert!(params.pinned);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTab {
    /// URL the content surface starts on.
    pub initial_url: String,

    /// Restored history entries and cursor.
    pub restored_history: Option<(Vec<String>, Option<usize>)>,

    /// Whether the tab starts pinned.
    pub pinned: bool,

    /// Group the tab starts in.
    pub group_id: Option<GroupId>,
}

impl NewTab {
    /// Creates parameters for a plain tab.
    #[must_use]
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            initial_url: initial_url.into(),
            restored_history: None,
            pinned: false,
            group_id: None,
        }
    }

    /// Sets restored history.
    #[must_use]
    pub fn with_history(mut self, entries: Vec<String>, cursor: Option<usize>) -> Self {
        self.restored_history = Some((entries, cursor));
        self
    }

    /// Sets the pinned flag.
    #[must_use]
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Sets the group.
    #[must_use]
    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

impl Default for NewTab {
    fn default() -> Self {
        Self::new(BLANK_URL)
    }
}

// ============================================================================
// ClosedTab
// ============================================================================

/// Result of removing a tab.
#[derive(Debug)]
pub struct ClosedTab {
    /// The removed tab.
    pub tab: Tab,

    /// Whether the removed tab was the active one.
    pub was_active: bool,

    /// Active tab after removal.
    pub active: Option<TabId>,
}

// ============================================================================
// TabRegistry
// ============================================================================

/// The set of open tabs.
#[derive(Debug)]
pub struct TabRegistry {
    /// Tabs by ID.
    tabs: FxHashMap<TabId, Tab>,
    /// Display order.
    order: Vec<TabId>,
    /// Active tab. Always a key of `tabs` when set.
    active: Option<TabId>,
    /// Capacity limit.
    max_tabs: usize,
    /// History bound for new tabs.
    max_history: usize,
}

// ============================================================================
// TabRegistry - Constructors
// ============================================================================

impl TabRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(max_tabs: usize, max_history: usize) -> Self {
        Self {
            tabs: FxHashMap::default(),
            order: Vec::with_capacity(max_tabs),
            active: None,
            max_tabs,
            max_history,
        }
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new(MAX_TABS, MAX_HISTORY_ENTRIES)
    }
}

// ============================================================================
// TabRegistry - Accessors
// ============================================================================

impl TabRegistry {
    /// Returns the number of open tabs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns `true` if no tabs are open.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Returns `true` if no more tabs can be created.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tabs.len() >= self.max_tabs
    }

    /// Returns the capacity limit.
    #[inline]
    #[must_use]
    pub fn max_tabs(&self) -> usize {
        self.max_tabs
    }

    /// Returns `true` if the tab exists.
    #[inline]
    #[must_use]
    pub fn contains(&self, tab_id: TabId) -> bool {
        self.tabs.contains_key(&tab_id)
    }

    /// Returns a tab by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, tab_id: TabId) -> Option<&Tab> {
        self.tabs.get(&tab_id)
    }

    /// Returns a mutable tab by ID.
    #[inline]
    pub fn get_mut(&mut self, tab_id: TabId) -> Option<&mut Tab> {
        self.tabs.get_mut(&tab_id)
    }

    /// Returns the active tab ID.
    #[inline]
    #[must_use]
    pub fn active_id(&self) -> Option<TabId> {
        self.active
    }

    /// Returns the active tab.
    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<&Tab> {
        self.active.and_then(|id| self.tabs.get(&id))
    }

    /// Returns the active tab mutably.
    #[inline]
    pub fn active_mut(&mut self) -> Option<&mut Tab> {
        self.active.and_then(|id| self.tabs.get_mut(&id))
    }

    /// Returns tab IDs in display order.
    #[inline]
    #[must_use]
    pub fn display_order(&self) -> &[TabId] {
        &self.order
    }

    /// Returns the display position of a tab.
    #[inline]
    #[must_use]
    pub fn position(&self, tab_id: TabId) -> Option<usize> {
        self.order.iter().position(|id| *id == tab_id)
    }

    /// Iterates tabs in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.order.iter().filter_map(|id| self.tabs.get(id))
    }
}

// ============================================================================
// TabRegistry - Lifecycle
// ============================================================================

impl TabRegistry {
    /// Creates a tab.
    ///
    /// The new tab is not activated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if the registry is full.
    pub fn create(&mut self, params: NewTab) -> Result<TabId> {
        if self.is_full() {
            warn!(limit = self.max_tabs, "Maximum number of tabs reached");
            return Err(Error::capacity_exceeded(self.max_tabs));
        }

        let tab_id = TabId::generate();
        let history = match params.restored_history {
            Some((entries, cursor)) => HistoryStack::restore(entries, cursor, self.max_history),
            None => HistoryStack::new(self.max_history),
        };

        let tab = Tab::new(
            tab_id,
            &params.initial_url,
            history,
            params.pinned,
            params.group_id,
        );
        self.tabs.insert(tab_id, tab);

        if params.pinned {
            self.order.insert(0, tab_id);
        } else {
            self.order.push(tab_id);
        }

        debug!(tab_id = %tab_id, pinned = params.pinned, count = self.tabs.len(), "Tab created");
        Ok(tab_id)
    }

    /// Removes a tab.
    ///
    /// If it was active, activation falls to the tab now last in display
    /// order. Returns `None` if the tab does not exist.
    pub fn close(&mut self, tab_id: TabId) -> Option<ClosedTab> {
        let tab = self.tabs.remove(&tab_id)?;
        self.order.retain(|id| *id != tab_id);

        let was_active = self.active == Some(tab_id);
        if was_active {
            self.active = self.order.last().copied();
        }

        debug!(tab_id = %tab_id, was_active, active = ?self.active, "Tab closed");
        Some(ClosedTab {
            tab,
            was_active,
            active: self.active,
        })
    }

    /// Makes a tab active.
    ///
    /// Returns `false` and leaves the selection untouched if the tab does not exist.
    pub fn set_active(&mut self, tab_id: TabId) -> bool {
        if !self.tabs.contains_key(&tab_id) {
            return false;
        }
        self.active = Some(tab_id);
        true
    }

    /// Flips the pinned flag and relocates the tab.
    ///
    /// Pinned tabs move to the head, unpinned tabs to the tail. Returns the
    /// new pinned flag, or `None` if the tab does not exist.
    pub fn toggle_pin(&mut self, tab_id: TabId) -> Option<bool> {
        let tab = self.tabs.get_mut(&tab_id)?;
        tab.pinned = !tab.pinned;
        let pinned = tab.pinned;

        self.order.retain(|id| *id != tab_id);
        if pinned {
            self.order.insert(0, tab_id);
        } else {
            self.order.push(tab_id);
        }

        debug!(tab_id = %tab_id, pinned, "Tab pin toggled");
        Some(pinned)
    }
}

// ============================================================================
// TabRegistry - Groups
// ============================================================================

impl TabRegistry {
    /// Assigns a tab to a group, or removes it from its group with `None`.
    ///
    /// Returns `false` if the tab does not exist.
    pub fn set_group(&mut self, tab_id: TabId, group_id: Option<GroupId>) -> bool {
        match self.tabs.get_mut(&tab_id) {
            Some(tab) => {
                tab.group_id = group_id;
                true
            }
            None => false,
        }
    }

    /// Returns the members of a group in display order.
    #[must_use]
    pub fn group_members(&self, group_id: GroupId) -> Vec<TabId> {
        self.iter()
            .filter(|tab| tab.group_id == Some(group_id))
            .map(Tab::id)
            .collect()
    }
}

// ============================================================================
// TabRegistry - History
// ============================================================================

impl TabRegistry {
    /// Returns every tab's history flattened, without duplicates.
    ///
    /// Entries keep their first occurrence, walking tabs in display order.
    #[must_use]
    pub fn combined_history(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        self.iter()
            .flat_map(|tab| tab.history.entries())
            .filter(|url| seen.insert(url.as_str()))
            .cloned()
            .collect()
    }

    /// Empties every tab's history.
    pub fn clear_history(&mut self) {
        for tab in self.tabs.values_mut() {
            tab.history.clear();
        }
        debug!(tabs = self.tabs.len(), "History cleared");
    }
}

// ============================================================================
// Tests
// ============================================================================
