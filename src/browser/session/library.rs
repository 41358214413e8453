//! Bookmarks, history and preferences.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, warn};

use crate::browser::bookmarks::{BOOKMARKS_KEY, Bookmark, sanitize_title};
use crate::browser::events::{NavState, SessionEvent};
use crate::error::Result;
use crate::resolver::{SearchEngine, UrlResolver};
use crate::storage::Theme;

use super::BrowserSession;

// ============================================================================
// BrowserSession - Bookmarks
// ============================================================================

impl BrowserSession {
    /// Adds or removes a bookmark for `url`.
    ///
    /// The title is read from the active tab's document, falling back to the
    /// URL. Every toggle persists the full list once. Returns whether the
    /// URL is bookmarked afterwards; empty input is a no-op returning `false`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if the list cannot be serialized.
    pub fn toggle_bookmark(&mut self, url: &str) -> Result<bool> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(false);
        }

        let title = self
            .registry
            .active_id()
            .and_then(|id| self.surfaces.get(&id))
            .and_then(|surface| surface.title().ok().flatten())
            .filter(|t| !sanitize_title(t).is_empty())
            .unwrap_or_else(|| url.to_string());

        let toggled = self.bookmarks.toggle(url, &title);

        let json = self.bookmarks.to_json()?;
        if let Err(e) = self.store.set(BOOKMARKS_KEY, &json) {
            warn!(error = %e, "Failed to persist bookmarks");
        }

        self.emit(SessionEvent::BookmarkStateChanged {
            bookmarked: toggled.is_bookmarked(),
        });
        self.emit(SessionEvent::BookmarksChanged);
        Ok(toggled.is_bookmarked())
    }

    /// Toggles the bookmark for the active tab's current URL.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if the list cannot be serialized.
    pub fn toggle_current_bookmark(&mut self) -> Result<bool> {
        let Some(url) = self.current_address() else {
            return Ok(false);
        };
        self.toggle_bookmark(&url)
    }

    /// Returns `true` if `url` is bookmarked.
    #[must_use]
    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.bookmarks.contains(url)
    }

    /// Returns bookmarks, newest first.
    #[must_use]
    pub fn bookmarks(&self) -> Vec<&Bookmark> {
        self.bookmarks.newest_first()
    }

    /// Returns the URL the active tab is on.
    ///
    /// Prefers the history entry, then the surface address.
    #[must_use]
    pub fn current_address(&self) -> Option<String> {
        let tab = self.registry.active()?;
        tab.current_url()
            .map(str::to_string)
            .or_else(|| self.surface_address(tab.id()))
    }
}

// ============================================================================
// BrowserSession - History
// ============================================================================

impl BrowserSession {
    /// Returns every tab's history, de-duplicated, in tab order.
    #[must_use]
    pub fn history_entries(&self) -> Vec<String> {
        self.registry.combined_history()
    }

    /// Empties every tab's history.
    pub fn clear_history(&mut self) -> NavState {
        self.registry.clear_history();
        self.emit(SessionEvent::HistoryChanged);
        self.emit_nav_state();
        self.nav_state()
    }
}

// ============================================================================
// BrowserSession - Preferences
// ============================================================================

impl BrowserSession {
    /// Selects and persists the search engine.
    pub fn set_search_engine(&mut self, engine: SearchEngine) {
        if let Err(e) = self
            .preferences
            .save_search_engine(self.store.as_ref(), engine)
        {
            warn!(error = %e, "Failed to persist search engine");
        }
        self.resolver = UrlResolver::new(engine);
        debug!(search_engine = %engine, "Search engine selected");
    }

    /// Switches between light and dark and persists the choice.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.preferences.theme.toggled();
        if let Err(e) = self.preferences.save_theme(self.store.as_ref(), theme) {
            warn!(error = %e, "Failed to persist theme");
        }
        self.emit(SessionEvent::ThemeChanged(theme));
        theme
    }
}
