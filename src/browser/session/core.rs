//! Core session struct, lifecycle and accessors.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::browser::bookmarks::{BOOKMARKS_KEY, Bookmarks};
use crate::browser::events::{EventHandler, NavState, SessionEvent};
use crate::browser::find::FindSession;
use crate::browser::registry::TabRegistry;
use crate::browser::surface::{ContentSurface, SurfaceFactory};
use crate::browser::tab::{BLANK_URL, Tab};
use crate::error::{Error, Result};
use crate::identifiers::TabId;
use crate::resolver::{SearchEngine, UrlResolver};
use crate::storage::{KeyValueStore, Preferences, Theme};

use super::builder::SessionBuilder;
use super::options::SessionOptions;

// ============================================================================
// BrowserSession
// ============================================================================

/// The browser shell's state.
///
/// Owns the tab registry, one content surface per tab, bookmarks and
/// preferences. Every operation runs to completion on `&mut self`;
/// observable changes are reported through the event handler.
pub struct BrowserSession {
    /// Configuration.
    pub(crate) options: SessionOptions,
    /// Open tabs.
    pub(crate) registry: TabRegistry,
    /// Content surface per tab.
    pub(crate) surfaces: FxHashMap<TabId, Box<dyn ContentSurface>>,
    /// Creates surfaces for new tabs.
    pub(crate) factory: Box<dyn SurfaceFactory>,
    /// Durable storage.
    pub(crate) store: Box<dyn KeyValueStore>,
    /// Loaded preferences.
    pub(crate) preferences: Preferences,
    /// Input resolver for the selected engine.
    pub(crate) resolver: UrlResolver,
    /// Bookmarks.
    pub(crate) bookmarks: Bookmarks,
    /// Find state, scoped to one tab.
    pub(crate) find: Option<(TabId, FindSession)>,
    /// UI callback.
    pub(crate) handler: Option<EventHandler>,
    /// Whether `init` has run.
    pub(crate) initialized: bool,
}

impl fmt::Debug for BrowserSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserSession")
            .field("tabs", &self.registry.len())
            .field("active", &self.registry.active_id())
            .field("bookmarks", &self.bookmarks.len())
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BrowserSession - Constructors
// ============================================================================

impl BrowserSession {
    /// Creates a builder.
    #[inline]
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Assembles a session from validated parts.
    pub(crate) fn from_parts(
        options: SessionOptions,
        store: Box<dyn KeyValueStore>,
        factory: Box<dyn SurfaceFactory>,
        handler: Option<EventHandler>,
    ) -> Self {
        let preferences = Preferences::new(options.default_search_engine);
        Self {
            registry: TabRegistry::new(options.max_tabs, options.max_history_entries),
            surfaces: FxHashMap::default(),
            factory,
            store,
            resolver: UrlResolver::new(preferences.search_engine),
            preferences,
            bookmarks: Bookmarks::new(),
            find: None,
            handler,
            initialized: false,
            options,
        }
    }
}

// ============================================================================
// BrowserSession - Lifecycle
// ============================================================================

impl BrowserSession {
    /// Loads persisted state and opens the first tab.
    ///
    /// Returns the ID of the opened tab.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the session is already initialized, or
    /// the error from creating the first tab.
    pub fn init(&mut self) -> Result<TabId> {
        if self.initialized {
            return Err(Error::config("Session is already initialized"));
        }

        let defaults = Preferences::new(self.options.default_search_engine);
        self.preferences = Preferences::load(self.store.as_ref(), defaults);
        self.resolver = UrlResolver::new(self.preferences.search_engine);
        self.emit(SessionEvent::ThemeChanged(self.preferences.theme));

        self.load_bookmarks();
        self.initialized = true;

        let tab_id = self.create_tab(BLANK_URL)?;
        if let Some(url) = self.options.initial_url.clone() {
            self.navigate(tab_id, &url)?;
        }

        info!(
            tab_id = %tab_id,
            search_engine = %self.preferences.search_engine,
            bookmarks = self.bookmarks.len(),
            "Session initialized"
        );
        Ok(tab_id)
    }

    /// Closes every tab and detaches every surface.
    ///
    /// Persisted state is left untouched. The session may be initialized again.
    pub fn dispose(&mut self) {
        self.clear_find();

        let ids: Vec<TabId> = self.registry.display_order().to_vec();
        for tab_id in ids {
            if let Some(mut surface) = self.surfaces.remove(&tab_id) {
                surface.detach();
            }
            self.registry.close(tab_id);
            self.emit(SessionEvent::TabClosed { tab_id });
        }

        self.initialized = false;
        self.emit(SessionEvent::ActiveTabChanged { tab_id: None });
        self.emit_nav_state();
        info!("Session disposed");
    }

    /// Replaces the event handler.
    pub fn set_event_handler(&mut self, handler: EventHandler) {
        self.handler = Some(handler);
    }

    /// Reads bookmarks, discarding unreadable data.
    fn load_bookmarks(&mut self) {
        let raw = match self.store.get(BOOKMARKS_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to read bookmarks");
                None
            }
        };

        self.bookmarks = match raw.as_deref().map(Bookmarks::from_json) {
            None => Bookmarks::new(),
            Some(Ok(bookmarks)) => bookmarks,
            Some(Err(e)) => {
                let e = Error::storage_corrupt(BOOKMARKS_KEY, e.to_string());
                warn!(error = %e, "Resetting bookmarks");
                if let Err(e) = self.store.remove(BOOKMARKS_KEY) {
                    warn!(error = %e, "Failed to remove corrupt bookmarks");
                }
                Bookmarks::new()
            }
        };

        debug!(count = self.bookmarks.len(), "Bookmarks loaded");
        self.emit(SessionEvent::BookmarksChanged);
    }
}

// ============================================================================
// BrowserSession - Accessors
// ============================================================================

impl BrowserSession {
    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Returns `true` once [`init`](Self::init) has run.
    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the tab registry.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    /// Returns a tab by ID.
    #[inline]
    #[must_use]
    pub fn tab(&self, tab_id: TabId) -> Option<&Tab> {
        self.registry.get(tab_id)
    }

    /// Returns the active tab ID.
    #[inline]
    #[must_use]
    pub fn active_tab_id(&self) -> Option<TabId> {
        self.registry.active_id()
    }

    /// Returns the number of open tabs.
    #[inline]
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.registry.len()
    }

    /// Returns the loaded preferences.
    #[inline]
    #[must_use]
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Returns the selected search engine.
    #[inline]
    #[must_use]
    pub fn search_engine(&self) -> SearchEngine {
        self.preferences.search_engine
    }

    /// Returns the current theme.
    #[inline]
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.preferences.theme
    }

    /// Returns the input resolver.
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    /// Returns the navigation state of the active tab.
    #[must_use]
    pub fn nav_state(&self) -> NavState {
        match self.registry.active() {
            Some(tab) => NavState {
                active_tab: Some(tab.id()),
                can_go_back: tab.history().can_go_back(),
                can_go_forward: tab.history().can_go_forward(),
                current_url: tab.current_url().map(str::to_string),
            },
            None => NavState::default(),
        }
    }
}

// ============================================================================
// BrowserSession - Internal
// ============================================================================

impl BrowserSession {
    /// Sends an event to the handler.
    pub(crate) fn emit(&self, event: SessionEvent) {
        if let Some(handler) = &self.handler {
            handler(&event);
        }
    }

    /// Sends the active tab's navigation state.
    pub(crate) fn emit_nav_state(&self) {
        self.emit(SessionEvent::NavigationStateChanged(self.nav_state()));
    }

    /// Sends the address bar URL and the matching bookmark state.
    pub(crate) fn announce_address(&self, url: &str) {
        self.emit(SessionEvent::AddressChanged {
            url: url.to_string(),
        });
        self.emit(SessionEvent::BookmarkStateChanged {
            bookmarked: !url.is_empty() && self.bookmarks.contains(url),
        });
    }

    /// Returns the address a surface is showing.
    ///
    /// Falls back to the dispatched source when the document is cross-origin.
    pub(crate) fn surface_address(&self, tab_id: TabId) -> Option<String> {
        let surface = self.surfaces.get(&tab_id)?;
        surface.location().ok().or_else(|| surface.source())
    }

    /// Returns a tab's surface.
    pub(crate) fn surface_mut(&mut self, tab_id: TabId) -> Option<&mut Box<dyn ContentSurface>> {
        self.surfaces.get_mut(&tab_id)
    }
}
