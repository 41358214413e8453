//! Content surfaces.
//!
//! A content surface hosts one tab's document. The session drives it through
//! [`ContentSurface`] and creates one per tab through a [`SurfaceFactory`].
//!
//! [`HeadlessSurface`] keeps its state in memory and can be scripted, which
//! makes it the surface of choice for embedding without a renderer and for
//! tests.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::{Error, Result};
use crate::identifiers::TabId;

use super::find::{MatchSpan, TextNode};

// ============================================================================
// Traits
// ============================================================================

/// Host of one tab's document.
pub trait ContentSurface: Send {
    /// Starts loading a URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LoadFailure`] if the load cannot be dispatched.
    fn set_source(&mut self, url: &str) -> Result<()>;

    /// Reloads the current document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be reloaded in place.
    fn reload(&mut self) -> Result<()>;

    /// Returns the URL last passed to [`set_source`](Self::set_source).
    fn source(&self) -> Option<String>;

    /// Returns the loaded document's title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CrossOriginRestricted`] for cross-origin documents.
    fn title(&self) -> Result<Option<String>>;

    /// Returns the loaded document's location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CrossOriginRestricted`] for cross-origin documents.
    fn location(&self) -> Result<String>;

    /// Replaces the document with inline markup.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn render_placeholder(&mut self, html: &str) -> Result<()>;

    /// Returns the document's text nodes in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CrossOriginRestricted`] for cross-origin documents.
    fn text_nodes(&self) -> Result<Vec<TextNode>>;

    /// Highlights matches, marking `current` as the selected one.
    fn highlight(&mut self, spans: &[MatchSpan], current: Option<usize>);

    /// Removes all find highlights.
    fn clear_highlights(&mut self);

    /// Detaches the surface from its host.
    ///
    /// Loads completing afterwards are ignored by the session.
    fn detach(&mut self);
}

/// Creates a surface for a new tab.
pub trait SurfaceFactory: Send {
    /// Creates a surface that starts on `initial_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be created.
    fn create(&mut self, tab_id: TabId, initial_url: &str) -> Result<Box<dyn ContentSurface>>;
}

// ============================================================================
// HeadlessState
// ============================================================================

/// In-memory document state.
#[derive(Debug, Default)]
struct HeadlessState {
    source: Option<String>,
    loads: Vec<String>,
    reloads: usize,
    title: Option<String>,
    location: Option<String>,
    cross_origin: bool,
    fail_loads: bool,
    placeholder: Option<String>,
    text: Vec<TextNode>,
    highlights: Vec<MatchSpan>,
    selected: Option<usize>,
    detached: bool,
}

// ============================================================================
// HeadlessSurface
// ============================================================================

/// Surface without a renderer.
///
/// Clones share state, so a clone kept outside the session observes and
/// scripts the same document.
#[derive(Clone, Default)]
pub struct HeadlessSurface {
    state: Arc<Mutex<HeadlessState>>,
}

impl fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("HeadlessSurface")
            .field("source", &state.source)
            .field("detached", &state.detached)
            .finish_non_exhaustive()
    }
}

impl HeadlessSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title.
    pub fn set_title(&self, title: Option<&str>) {
        self.state.lock().title = title.map(str::to_string);
    }

    /// Overrides the reported location (e.g. after a redirect).
    pub fn set_location(&self, location: Option<&str>) {
        self.state.lock().location = location.map(str::to_string);
    }

    /// Makes the document unreadable, as a cross-origin page would be.
    pub fn set_cross_origin(&self, cross_origin: bool) {
        self.state.lock().cross_origin = cross_origin;
    }

    /// Makes subsequent loads fail.
    pub fn set_fail_loads(&self, fail: bool) {
        self.state.lock().fail_loads = fail;
    }

    /// Replaces the document text.
    pub fn set_text(&self, nodes: Vec<TextNode>) {
        self.state.lock().text = nodes;
    }

    /// Returns every URL dispatched to the surface, in order.
    #[must_use]
    pub fn loads(&self) -> Vec<String> {
        self.state.lock().loads.clone()
    }

    /// Returns how many times the surface was reloaded.
    #[must_use]
    pub fn reload_count(&self) -> usize {
        self.state.lock().reloads
    }

    /// Returns the rendered placeholder markup, if any.
    #[must_use]
    pub fn placeholder(&self) -> Option<String> {
        self.state.lock().placeholder.clone()
    }

    /// Returns the highlighted spans and the selected index.
    #[must_use]
    pub fn highlights(&self) -> (Vec<MatchSpan>, Option<usize>) {
        let state = self.state.lock();
        (state.highlights.clone(), state.selected)
    }

    /// Returns `true` once the surface was detached.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.state.lock().detached
    }

    fn readable(&self, operation: &str) -> Result<parking_lot::MutexGuard<'_, HeadlessState>> {
        let state = self.state.lock();
        if state.cross_origin {
            return Err(Error::cross_origin(operation));
        }
        Ok(state)
    }
}

impl ContentSurface for HeadlessSurface {
    fn set_source(&mut self, url: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_loads {
            return Err(Error::load_failure(url, "load rejected"));
        }
        trace!(url = %url, "Headless surface loading");
        state.source = Some(url.to_string());
        state.loads.push(url.to_string());
        state.location = None;
        state.placeholder = None;
        state.highlights.clear();
        state.selected = None;
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        match state.source {
            Some(_) => {
                state.reloads += 1;
                Ok(())
            }
            None => Err(Error::load_failure("about:blank", "nothing to reload")),
        }
    }

    fn source(&self) -> Option<String> {
        self.state.lock().source.clone()
    }

    fn title(&self) -> Result<Option<String>> {
        Ok(self.readable("title")?.title.clone())
    }

    fn location(&self) -> Result<String> {
        let state = self.readable("location")?;
        Ok(state
            .location
            .clone()
            .or_else(|| state.source.clone())
            .unwrap_or_default())
    }

    fn render_placeholder(&mut self, html: &str) -> Result<()> {
        self.state.lock().placeholder = Some(html.to_string());
        Ok(())
    }

    fn text_nodes(&self) -> Result<Vec<TextNode>> {
        Ok(self.readable("text")?.text.clone())
    }

    fn highlight(&mut self, spans: &[MatchSpan], current: Option<usize>) {
        let mut state = self.state.lock();
        state.highlights = spans.to_vec();
        state.selected = current;
    }

    fn clear_highlights(&mut self) {
        let mut state = self.state.lock();
        state.highlights.clear();
        state.selected = None;
    }

    fn detach(&mut self) {
        self.state.lock().detached = true;
    }
}

// ============================================================================
// HeadlessSurfaceFactory
// ============================================================================

/// Factory producing [`HeadlessSurface`]s.
///
/// Clones share the registry of created surfaces, so a clone kept outside
/// the session can look up any tab's surface.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurfaceFactory {
    surfaces: Arc<Mutex<FxHashMap<TabId, HeadlessSurface>>>,
}

impl HeadlessSurfaceFactory {
    /// Creates a factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the surface created for a tab.
    #[must_use]
    pub fn surface(&self, tab_id: TabId) -> Option<HeadlessSurface> {
        self.surfaces.lock().get(&tab_id).cloned()
    }
}

impl SurfaceFactory for HeadlessSurfaceFactory {
    fn create(&mut self, tab_id: TabId, initial_url: &str) -> Result<Box<dyn ContentSurface>> {
        let mut surface = HeadlessSurface::new();
        surface.set_source(initial_url)?;
        self.surfaces.lock().insert(tab_id, surface.clone());
        Ok(Box::new(surface))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::{ContentSurface, HeadlessSurface, HeadlessSurfaceFactory, SurfaceFactory};
    use crate::browser::TextNode;
    use crate::error::Error;
    use crate::identifiers::TabId;

    #[test]
    fn test_clones_share_state() {
        let mut surface = HeadlessSurface::new();
        let observer = surface.clone();
        surface.set_source("https://a.test").expect("load");
        assert_eq!(observer.loads(), ["https://a.test"]);
        assert_eq!(observer.source().as_deref(), Some("https://a.test"));
    }

    #[test]
    fn test_cross_origin_blocks_reads() {
        let mut surface = HeadlessSurface::new();
        surface.set_source("https://a.test").expect("load");
        surface.set_text(vec![TextNode::new("secret")]);
        surface.set_cross_origin(true);

        assert!(matches!(
            surface.title(),
            Err(Error::CrossOriginRestricted { .. })
        ));
        assert!(surface.location().is_err());
        assert!(surface.text_nodes().is_err());
        assert_eq!(surface.source().as_deref(), Some("https://a.test"));
    }

    #[test]
    fn test_failed_load_keeps_previous_source() {
        let mut surface = HeadlessSurface::new();
        surface.set_source("https://a.test").expect("load");
        surface.set_fail_loads(true);
        assert!(surface.set_source("https://b.test").is_err());
        assert_eq!(surface.loads(), ["https://a.test"]);
    }

    #[test]
    fn test_location_prefers_override() {
        let mut surface = HeadlessSurface::new();
        surface.set_source("https://a.test").expect("load");
        assert_eq!(surface.location().expect("location"), "https://a.test");
        surface.set_location(Some("https://a.test/landing"));
        assert_eq!(surface.location().expect("location"), "https://a.test/landing");
    }

    #[test]
    fn test_factory_tracks_surfaces() {
        let mut factory = HeadlessSurfaceFactory::new();
        let tab_id = TabId::generate();
        let _surface = factory.create(tab_id, "about:blank").expect("create");

        let handle = factory.surface(tab_id).expect("surface");
        assert_eq!(handle.loads(), ["about:blank"]);
        assert!(factory.surface(TabId::generate()).is_none());
    }
}
