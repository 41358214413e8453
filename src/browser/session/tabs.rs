//! Tab lifecycle, selection, pinning and groups.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, warn};

use crate::browser::events::{NavState, SessionEvent};
use crate::browser::registry::NewTab;
use crate::browser::tab::BLANK_URL;
use crate::error::{Error, Result};
use crate::identifiers::{GroupId, TabId};

use super::BrowserSession;

// ============================================================================
// BrowserSession - Tabs
// ============================================================================

impl BrowserSession {
    /// Opens a tab on `initial_url` and activates it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if the tab limit is reached.
    pub fn create_tab(&mut self, initial_url: &str) -> Result<TabId> {
        self.create_tab_with(NewTab::new(initial_url))
    }

    /// Opens a tab from full parameters and activates it.
    ///
    /// A non-blank initial URL without restored history is recorded as the
    /// tab's first history entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if the tab limit is reached, or
    /// the surface factory's error.
    pub fn create_tab_with(&mut self, params: NewTab) -> Result<TabId> {
        let initial_url = params.initial_url.clone();
        let record_initial = params.restored_history.is_none() && initial_url != BLANK_URL;
        let pinned = params.pinned;

        let tab_id = match self.registry.create(params) {
            Ok(tab_id) => tab_id,
            Err(e) => {
                if let Error::CapacityExceeded { limit } = e {
                    self.emit(SessionEvent::CapacityExceeded { limit });
                }
                return Err(e);
            }
        };

        let dispatch = self.options.dispatch_url(&initial_url);
        let surface = match self.factory.create(tab_id, &dispatch) {
            Ok(surface) => surface,
            Err(e) => {
                warn!(tab_id = %tab_id, error = %e, "Failed to create surface");
                self.registry.close(tab_id);
                return Err(e);
            }
        };
        self.surfaces.insert(tab_id, surface);

        if record_initial
            && let Some(tab) = self.registry.get_mut(tab_id)
            && tab.history.push(initial_url.as_str())
        {
            self.emit(SessionEvent::HistoryChanged);
        }

        let position = self.registry.position(tab_id).unwrap_or_default();
        self.emit(SessionEvent::TabOpened {
            tab_id,
            position,
            pinned,
        });

        self.activate(tab_id);
        Ok(tab_id)
    }

    /// Closes a tab and detaches its surface.
    ///
    /// If it was active, the tab now last in display order becomes active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if the tab does not exist.
    pub fn close_tab(&mut self, tab_id: TabId) -> Result<NavState> {
        let closed = self
            .registry
            .close(tab_id)
            .ok_or_else(|| Error::tab_not_found(tab_id))?;

        if let Some(mut surface) = self.surfaces.remove(&tab_id) {
            surface.detach();
        }
        if self.find.as_ref().is_some_and(|(id, _)| *id == tab_id) {
            self.find = None;
        }

        self.emit(SessionEvent::TabClosed { tab_id });
        if !closed.tab.history().is_empty() {
            self.emit(SessionEvent::HistoryChanged);
        }

        if closed.was_active {
            match closed.active {
                Some(next) => self.activate(next),
                None => {
                    self.emit(SessionEvent::ActiveTabChanged { tab_id: None });
                    self.announce_address("");
                    self.emit_nav_state();
                }
            }
        } else {
            self.emit_nav_state();
        }

        Ok(self.nav_state())
    }

    /// Makes a tab active.
    ///
    /// Unknown IDs are ignored and the selection is left unchanged.
    pub fn switch_tab(&mut self, tab_id: TabId) -> NavState {
        if self.registry.contains(tab_id) {
            self.activate(tab_id);
        } else {
            debug!(tab_id = %tab_id, "Ignoring switch to unknown tab");
        }
        self.nav_state()
    }

    /// Flips a tab's pinned flag and moves it to the head or tail.
    ///
    /// Returns the new pinned flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if the tab does not exist.
    pub fn toggle_pin(&mut self, tab_id: TabId) -> Result<bool> {
        let pinned = self
            .registry
            .toggle_pin(tab_id)
            .ok_or_else(|| Error::tab_not_found(tab_id))?;

        let position = self.registry.position(tab_id).unwrap_or_default();
        self.emit(SessionEvent::TabRelocated {
            tab_id,
            position,
            pinned,
        });

        if self.registry.active_id() == Some(tab_id) {
            self.emit(SessionEvent::ActiveTabChanged {
                tab_id: Some(tab_id),
            });
        }
        Ok(pinned)
    }

    /// Activates a tab that is known to exist.
    ///
    /// Find state never carries over: highlights on the newly active
    /// surface are cleared.
    pub(crate) fn activate(&mut self, tab_id: TabId) {
        if !self.registry.set_active(tab_id) {
            return;
        }

        self.find = None;
        if let Some(surface) = self.surface_mut(tab_id) {
            surface.clear_highlights();
        }

        debug!(tab_id = %tab_id, "Tab activated");
        self.emit(SessionEvent::ActiveTabChanged {
            tab_id: Some(tab_id),
        });

        let address = self.surface_address(tab_id).unwrap_or_default();
        self.announce_address(&address);
        self.emit_nav_state();
    }
}

// ============================================================================
// BrowserSession - Groups
// ============================================================================

impl BrowserSession {
    /// Creates a new, empty group.
    #[must_use]
    pub fn create_group(&self) -> GroupId {
        let group_id = GroupId::generate();
        debug!(group_id = %group_id, "Group created");
        group_id
    }

    /// Moves a tab into a group, or out of its group with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if the tab does not exist.
    pub fn assign_group(&mut self, tab_id: TabId, group_id: Option<GroupId>) -> Result<()> {
        if !self.registry.set_group(tab_id, group_id) {
            return Err(Error::tab_not_found(tab_id));
        }
        self.emit(SessionEvent::TabGroupChanged { tab_id, group_id });
        Ok(())
    }

    /// Returns a group's tabs in display order.
    #[must_use]
    pub fn group_members(&self, group_id: GroupId) -> Vec<TabId> {
        self.registry.group_members(group_id)
    }
}
