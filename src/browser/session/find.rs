//! Find-in-page for the active tab.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, warn};

use crate::browser::events::SessionEvent;
use crate::browser::find::{FindReport, FindSession, MatchSpan};

use super::BrowserSession;

// ============================================================================
// BrowserSession - Find
// ============================================================================

impl BrowserSession {
    /// Searches the active tab's document and selects the first match.
    ///
    /// An empty term clears the search. Unreadable documents report no
    /// matches.
    pub fn find_in_page(&mut self, term: &str) -> FindReport {
        self.clear_find();

        let Some(tab_id) = self.registry.active_id() else {
            return FindReport::default();
        };
        if term.is_empty() {
            self.emit(SessionEvent::FindUpdated(FindReport::default()));
            return FindReport::default();
        }
        let Some(surface) = self.surface_mut(tab_id) else {
            return FindReport::default();
        };

        let nodes = match surface.text_nodes() {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!(tab_id = %tab_id, error = %e, "Document not searchable");
                self.emit(SessionEvent::FindUpdated(FindReport::default()));
                return FindReport::default();
            }
        };

        let find = FindSession::new(term, &nodes);
        surface.highlight(find.matches(), find.current_index());
        let report = find.report();

        debug!(tab_id = %tab_id, matches = report.total, "Find in page");
        self.find = Some((tab_id, find));
        self.emit(SessionEvent::FindUpdated(report));
        report
    }

    /// Selects the next match, wrapping to the first.
    pub fn find_next(&mut self) -> FindReport {
        self.step_find(FindSession::next)
    }

    /// Selects the previous match, wrapping to the last.
    pub fn find_previous(&mut self) -> FindReport {
        self.step_find(FindSession::previous)
    }

    /// Clears matches and highlights.
    pub fn clear_find(&mut self) {
        if let Some((tab_id, _)) = self.find.take()
            && let Some(surface) = self.surface_mut(tab_id)
        {
            surface.clear_highlights();
            self.emit(SessionEvent::FindUpdated(FindReport::default()));
        }
    }

    /// Returns the active find state.
    #[must_use]
    pub fn find_report(&self) -> FindReport {
        self.find
            .as_ref()
            .map(|(_, find)| find.report())
            .unwrap_or_default()
    }

    /// Moves the selection of the active tab's search.
    fn step_find(&mut self, step: fn(&mut FindSession) -> Option<&MatchSpan>) -> FindReport {
        let active = self.registry.active_id();
        let Some((tab_id, find)) = self.find.as_mut() else {
            return FindReport::default();
        };
        let tab_id = *tab_id;
        if Some(tab_id) != active {
            return FindReport::default();
        }

        step(find);
        let report = find.report();
        if let Some(surface) = self.surfaces.get_mut(&tab_id) {
            surface.highlight(find.matches(), find.current_index());
        }

        self.emit(SessionEvent::FindUpdated(report));
        report
    }
}
