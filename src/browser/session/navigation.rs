//! Navigation: address input, history moves, reload and load callbacks.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, error, trace, warn};

use crate::browser::bookmarks::sanitize_title;
use crate::browser::events::{NavState, SessionEvent};
use crate::browser::history::{HistoryMove, HistoryStack};
use crate::browser::tab::BLANK_URL;
use crate::error::{Error, Result};
use crate::identifiers::TabId;

use super::BrowserSession;

// ============================================================================
// Constants
// ============================================================================

/// Document rendered into a surface whose load failed.
pub const ERROR_PAGE_HTML: &str = "<div style=\"text-align: center; padding: 20px;\">\
                                   <h2>Error</h2>\
                                   <p>The page could not be loaded.</p>\
                                   </div>";

// ============================================================================
// BrowserSession - Navigation
// ============================================================================

impl BrowserSession {
    /// Resolves address-bar input and loads it in the active tab.
    ///
    /// Empty input does nothing. With no tab open, one is created first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if a tab had to be created and
    /// the limit is reached.
    pub fn resolve_and_navigate(&mut self, raw_input: &str) -> Result<NavState> {
        if raw_input.trim().is_empty() {
            return Ok(self.nav_state());
        }

        let tab_id = match self.registry.active_id() {
            Some(tab_id) => tab_id,
            None => {
                debug!("No active tab, opening one");
                self.create_tab(BLANK_URL)?
            }
        };
        self.navigate(tab_id, raw_input)
    }

    /// Resolves input and loads it in a tab.
    ///
    /// The resolved URL enters the tab's history before the load is
    /// dispatched, so a load that fails still counts as visited. Dispatch
    /// failures render the error placeholder instead of propagating.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if the tab does not exist.
    pub fn navigate(&mut self, tab_id: TabId, raw_input: &str) -> Result<NavState> {
        let Some(target) = self.resolver.resolve(raw_input) else {
            return Ok(self.nav_state());
        };

        let tab = self
            .registry
            .get_mut(tab_id)
            .ok_or_else(|| Error::tab_not_found(tab_id))?;
        let recorded = tab.history.push(target.url.as_str());

        debug!(tab_id = %tab_id, url = %target.url, kind = ?target.kind, "Navigating");
        if recorded {
            self.emit(SessionEvent::HistoryChanged);
        }

        self.dispatch(tab_id, &target.url);

        if self.registry.active_id() == Some(tab_id) {
            self.announce_address(&target.url);
        }
        self.emit_nav_state();
        Ok(self.nav_state())
    }

    /// Moves the active tab one entry back.
    ///
    /// At the start of history nothing happens.
    pub fn go_back(&mut self) -> NavState {
        self.step(|history| history.back())
    }

    /// Moves the active tab one entry forward.
    ///
    /// At the end of history nothing happens.
    pub fn go_forward(&mut self) -> NavState {
        self.step(|history| history.forward())
    }

    /// Reloads the active tab without touching history.
    ///
    /// Falls back to re-dispatching the surface's source when an in-place
    /// reload is refused.
    pub fn reload(&mut self) -> NavState {
        let Some(tab_id) = self.registry.active_id() else {
            return self.nav_state();
        };

        let Some(surface) = self.surface_mut(tab_id) else {
            return self.nav_state();
        };

        if let Err(e) = surface.reload() {
            trace!(tab_id = %tab_id, error = %e, "In-place reload refused, re-dispatching");
            let source = surface.source().unwrap_or_else(|| BLANK_URL.to_string());
            if let Err(e) = surface.set_source(&source) {
                warn!(tab_id = %tab_id, error = %e, "Reload failed");
                self.render_error(tab_id, &source);
            }
        }

        debug!(tab_id = %tab_id, "Tab reloaded");
        self.nav_state()
    }

    /// Moves the active tab's history cursor and loads the entry.
    fn step(&mut self, movement: impl FnOnce(&mut HistoryStack) -> HistoryMove) -> NavState {
        let Some(tab) = self.registry.active_mut() else {
            return self.nav_state();
        };
        let tab_id = tab.id();

        match movement(&mut tab.history) {
            HistoryMove::Moved(url) => {
                debug!(tab_id = %tab_id, url = %url, "Loading history entry");
                self.dispatch(tab_id, &url);
                self.announce_address(&url);
                self.emit_nav_state();
            }
            HistoryMove::Boundary => trace!(tab_id = %tab_id, "History boundary"),
        }
        self.nav_state()
    }

    /// Hands a URL to a tab's surface, rendering the error page on failure.
    ///
    /// Find state for the tab is dropped since the document changes.
    fn dispatch(&mut self, tab_id: TabId, url: &str) {
        if self.find.as_ref().is_some_and(|(id, _)| *id == tab_id) {
            self.find = None;
        }

        let dispatch = self.options.dispatch_url(url);
        let Some(surface) = self.surface_mut(tab_id) else {
            warn!(tab_id = %tab_id, "Tab has no surface");
            return;
        };

        if let Err(e) = surface.set_source(&dispatch) {
            warn!(tab_id = %tab_id, url = %url, error = %e, "Dispatch failed");
            self.render_error(tab_id, url);
        }
    }

    /// Resets a surface to a blank document carrying the error page.
    fn render_error(&mut self, tab_id: TabId, url: &str) {
        let Some(surface) = self.surface_mut(tab_id) else {
            return;
        };

        if let Err(e) = surface.set_source(BLANK_URL) {
            warn!(tab_id = %tab_id, error = %e, "Failed to reset surface");
        }
        if let Err(e) = surface.render_placeholder(ERROR_PAGE_HTML) {
            error!(tab_id = %tab_id, error = %e, "Failed to render error page");
        }

        self.emit(SessionEvent::LoadFailed {
            tab_id,
            url: url.to_string(),
        });
    }
}

// ============================================================================
// BrowserSession - Load Callbacks
// ============================================================================

impl BrowserSession {
    /// Handles a surface's load-complete notification.
    ///
    /// Relabels the tab from the document title, or its location when the
    /// title is empty or unreadable. For the active tab the address and
    /// bookmark state are re-announced. Notifications for closed tabs are
    /// ignored.
    pub fn on_load_complete(&mut self, tab_id: TabId) {
        let Some(surface) = self.surfaces.get(&tab_id) else {
            trace!(tab_id = %tab_id, "Ignoring load for closed tab");
            return;
        };

        let title = match surface.title() {
            Ok(title) => title.map(|t| sanitize_title(&t)).filter(|t| !t.is_empty()),
            Err(e) => {
                trace!(tab_id = %tab_id, error = %e, "Title unreadable");
                None
            }
        };
        let address = self.surface_address(tab_id).unwrap_or_default();
        let label = title.unwrap_or_else(|| sanitize_title(&address));

        let Some(tab) = self.registry.get_mut(tab_id) else {
            return;
        };
        tab.label.clone_from(&label);

        debug!(tab_id = %tab_id, label = %label, "Load complete");
        self.emit(SessionEvent::TabLabelChanged { tab_id, label });

        if self.registry.active_id() == Some(tab_id) {
            self.announce_address(&address);
        }
    }

    /// Handles a surface's load-error notification.
    ///
    /// Notifications for closed tabs are ignored.
    pub fn on_load_error(&mut self, tab_id: TabId) {
        let Some(surface) = self.surfaces.get(&tab_id) else {
            trace!(tab_id = %tab_id, "Ignoring load error for closed tab");
            return;
        };

        let url = surface.source().unwrap_or_default();
        warn!(tab_id = %tab_id, url = %url, "Load failed");
        self.render_error(tab_id, &url);
    }
}
