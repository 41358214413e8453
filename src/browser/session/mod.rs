//! Browser session.
//!
//! [`BrowserSession`] is the single owner of all shell state. Its methods
//! are split by concern:
//!
//! | Module | Operations |
//! |--------|------------|
//! | `core` | `init`, `dispose`, accessors, [`NavState`](crate::browser::NavState) |
//! | `tabs` | `create_tab`, `close_tab`, `switch_tab`, `toggle_pin`, groups |
//! | `navigation` | `resolve_and_navigate`, `navigate`, `go_back`, `go_forward`, `reload`, load callbacks |
//! | `library` | bookmarks, history, preferences |
//! | `find` | `find_in_page`, `find_next`, `find_previous`, `clear_find` |

// ============================================================================
// Submodules
// ============================================================================

/// Session builder.
pub mod builder;

/// Core session struct and lifecycle.
mod core;

/// Find-in-page.
mod find;

/// Bookmarks, history and preferences.
mod library;

/// Navigation and load callbacks.
mod navigation;

/// Session configuration.
pub mod options;

/// Tab lifecycle and groups.
mod tabs;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::SessionBuilder;
pub use core::BrowserSession;
pub use navigation::ERROR_PAGE_HTML;
pub use options::SessionOptions;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::{BrowserSession, ERROR_PAGE_HTML, SessionOptions};
    use crate::browser::{HeadlessSurfaceFactory, NavState, SessionEvent, TextNode};
    use crate::error::Error;
    use crate::resolver::SearchEngine;
    use crate::storage::{KeyValueStore, MemoryStore, THEME_KEY, Theme};

    struct Harness {
        session: BrowserSession,
        surfaces: HeadlessSurfaceFactory,
        store: MemoryStore,
        events: Arc<Mutex<Vec<SessionEvent>>>,
    }

    fn harness_with(options: SessionOptions, store: MemoryStore) -> Harness {
        let surfaces = HeadlessSurfaceFactory::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);

        let mut session = BrowserSession::builder()
            .options(options)
            .store(store.clone())
            .surface_factory(surfaces.clone())
            .on_event(move |event| sink.lock().push(event.clone()))
            .build()
            .expect("build session");
        session.init().expect("init session");

        Harness {
            session,
            surfaces,
            store,
            events,
        }
    }

    fn harness() -> Harness {
        harness_with(SessionOptions::new(), MemoryStore::new())
    }

    #[test]
    fn test_init_opens_one_blank_tab() {
        let h = harness();
        assert_eq!(h.session.tab_count(), 1);

        let tab_id = h.session.active_tab_id().expect("active tab");
        let tab = h.session.tab(tab_id).expect("tab");
        assert_eq!(tab.label(), "New Tab");
        assert!(tab.history().is_empty());

        let surface = h.surfaces.surface(tab_id).expect("surface");
        assert_eq!(surface.loads(), ["about:blank"]);
    }

    #[test]
    fn test_init_twice_is_config_error() {
        let mut h = harness();
        assert!(matches!(h.session.init(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_init_with_initial_url() {
        let h = harness_with(
            SessionOptions::new().with_initial_url("example.com"),
            MemoryStore::new(),
        );
        let state = h.session.nav_state();
        assert_eq!(state.current_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_navigate_records_history_and_dispatches() {
        let mut h = harness();
        let tab_id = h.session.active_tab_id().expect("active tab");

        h.session.resolve_and_navigate("example.com").expect("navigate");
        let state = h.session.resolve_and_navigate("hello world").expect("navigate");

        assert!(state.can_go_back);
        assert!(!state.can_go_forward);
        assert_eq!(
            h.session.tab(tab_id).expect("tab").history().entries(),
            [
                "https://example.com",
                "https://search.brave.com/search?q=hello%20world"
            ]
        );
        assert_eq!(
            h.surfaces.surface(tab_id).expect("surface").loads().last().map(String::as_str),
            Some("https://search.brave.com/search?q=hello%20world")
        );
    }

    #[test]
    fn test_empty_input_is_noop() {
        let mut h = harness();
        let before = h.session.nav_state();
        let after = h.session.resolve_and_navigate("   ").expect("navigate");
        assert_eq!(before, after);
    }

    #[test]
    fn test_back_and_forward_do_not_push() {
        let mut h = harness();
        let tab_id = h.session.active_tab_id().expect("active tab");
        h.session.resolve_and_navigate("a.com").expect("navigate");
        h.session.resolve_and_navigate("b.com").expect("navigate");

        let state = h.session.go_back();
        assert_eq!(state.current_url.as_deref(), Some("https://a.com"));
        assert!(state.can_go_forward);

        let state = h.session.go_forward();
        assert_eq!(state.current_url.as_deref(), Some("https://b.com"));
        assert_eq!(h.session.tab(tab_id).expect("tab").history().len(), 2);

        let loads = h.surfaces.surface(tab_id).expect("surface").loads();
        assert_eq!(loads.len(), 5);
    }

    #[test]
    fn test_back_at_boundary_is_silent() {
        let mut h = harness();
        h.session.resolve_and_navigate("a.com").expect("navigate");
        h.events.lock().clear();

        let state = h.session.go_back();
        assert!(!state.can_go_back);
        assert!(h.events.lock().is_empty());
    }

    #[test]
    fn test_failed_dispatch_renders_error_page() {
        let mut h = harness();
        let tab_id = h.session.active_tab_id().expect("active tab");
        let surface = h.surfaces.surface(tab_id).expect("surface");
        surface.set_fail_loads(true);

        h.session.resolve_and_navigate("example.com").expect("navigate");

        assert_eq!(surface.placeholder().as_deref(), Some(ERROR_PAGE_HTML));
        assert_eq!(
            h.session.nav_state().current_url.as_deref(),
            Some("https://example.com")
        );
        assert!(h.events.lock().iter().any(|e| matches!(
            e,
            SessionEvent::LoadFailed { url, .. } if url == "https://example.com"
        )));
    }

    #[test]
    fn test_proxy_rewrites_dispatch_only() {
        let mut h = harness_with(
            SessionOptions::new().with_proxy_endpoint("https://proxy.test/fetch"),
            MemoryStore::new(),
        );
        let tab_id = h.session.active_tab_id().expect("active tab");
        h.session.resolve_and_navigate("example.com").expect("navigate");

        let loads = h.surfaces.surface(tab_id).expect("surface").loads();
        assert_eq!(
            loads.last().map(String::as_str),
            Some("https://proxy.test/fetch?url=https%3A%2F%2Fexample.com")
        );
        assert_eq!(
            h.session.nav_state().current_url.as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_close_only_tab_clears_state() {
        let mut h = harness();
        let tab_id = h.session.active_tab_id().expect("active tab");
        h.session.resolve_and_navigate("example.com").expect("navigate");
        let surface = h.surfaces.surface(tab_id).expect("surface");

        let state = h.session.close_tab(tab_id).expect("close");
        assert_eq!(state, NavState::default());
        assert!(surface.is_detached());

        // Late notifications for the closed tab are ignored.
        h.session.on_load_complete(tab_id);
        h.session.on_load_error(tab_id);
        assert_eq!(h.session.tab_count(), 0);
    }

    #[test]
    fn test_close_missing_tab() {
        let mut h = harness();
        let tab_id = h.session.active_tab_id().expect("active tab");
        h.session.close_tab(tab_id).expect("close");
        assert!(matches!(
            h.session.close_tab(tab_id),
            Err(Error::TabNotFound { .. })
        ));
    }

    #[test]
    fn test_switch_to_unknown_tab_is_noop() {
        let mut h = harness();
        let first = h.session.active_tab_id().expect("active tab");
        let second = h.session.create_tab("https://example.com/").expect("tab");
        h.session.close_tab(first).expect("close");

        let state = h.session.switch_tab(first);
        assert_eq!(state.active_tab, Some(second));
        assert_eq!(state.current_url.as_deref(), Some("https://example.com/"));
        assert_eq!(h.session.active_tab_id(), Some(second));
    }

    #[test]
    fn test_navigate_without_tab_creates_one() {
        let mut h = harness();
        let first = h.session.active_tab_id().expect("active tab");
        h.session.close_tab(first).expect("close");

        let state = h.session.resolve_and_navigate("example.com").expect("navigate");
        assert_eq!(h.session.tab_count(), 1);
        assert_eq!(state.current_url.as_deref(), Some("https://example.com"));
        assert_ne!(state.active_tab, Some(first));
    }

    #[test]
    fn test_capacity_emits_notice() {
        let mut h = harness_with(SessionOptions::new().with_max_tabs(2), MemoryStore::new());
        h.session.create_tab("about:blank").expect("second tab");

        let err = h.session.create_tab("about:blank").unwrap_err();
        assert!(err.is_user_visible());
        assert_eq!(h.session.tab_count(), 2);
        assert!(
            h.events
                .lock()
                .contains(&SessionEvent::CapacityExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_create_tab_with_url_records_history() {
        let mut h = harness();
        let tab_id = h.session.create_tab("https://example.com/").expect("tab");
        let tab = h.session.tab(tab_id).expect("tab");
        assert_eq!(tab.label(), "Loading...");
        assert_eq!(tab.current_url(), Some("https://example.com/"));
        assert_eq!(h.session.active_tab_id(), Some(tab_id));
    }

    #[test]
    fn test_load_complete_labels_tab() {
        let mut h = harness();
        let tab_id = h.session.active_tab_id().expect("active tab");
        h.session.resolve_and_navigate("example.com").expect("navigate");
        let surface = h.surfaces.surface(tab_id).expect("surface");

        surface.set_title(Some("<b>Example</b> Domain"));
        h.session.on_load_complete(tab_id);
        assert_eq!(h.session.tab(tab_id).expect("tab").label(), "Example Domain");

        surface.set_cross_origin(true);
        h.session.on_load_complete(tab_id);
        assert_eq!(
            h.session.tab(tab_id).expect("tab").label(),
            "https://example.com"
        );
    }

    #[test]
    fn test_switch_tab_clears_find_state() {
        let mut h = harness();
        let first = h.session.active_tab_id().expect("active tab");
        h.surfaces
            .surface(first)
            .expect("surface")
            .set_text(vec![TextNode::new("needle needle")]);

        let report = h.session.find_in_page("needle");
        assert_eq!(report.total, 2);

        let second = h.session.create_tab("about:blank").expect("tab");
        assert_eq!(h.session.find_report().total, 0);
        assert_eq!(h.session.find_next().total, 0);

        h.session.switch_tab(first);
        let (highlights, _) = h.surfaces.surface(first).expect("surface").highlights();
        assert!(highlights.is_empty());
        assert_eq!(h.session.switch_tab(second).active_tab, Some(second));
    }

    #[test]
    fn test_find_next_and_previous_wrap() {
        let mut h = harness();
        let tab_id = h.session.active_tab_id().expect("active tab");
        let surface = h.surfaces.surface(tab_id).expect("surface");
        surface.set_text(vec![
            TextNode::new("one two"),
            TextNode::new("two").with_parent("script"),
            TextNode::new("TWO"),
        ]);

        let report = h.session.find_in_page("two");
        assert_eq!((report.total, report.current), (2, Some(0)));
        assert_eq!(h.session.find_next().current, Some(1));
        assert_eq!(h.session.find_next().current, Some(0));
        assert_eq!(h.session.find_previous().current, Some(1));
        assert_eq!(surface.highlights().1, Some(1));

        h.session.clear_find();
        assert!(surface.highlights().0.is_empty());
        assert_eq!(h.session.find_report().total, 0);
    }

    #[test]
    fn test_find_cross_origin_reports_nothing() {
        let mut h = harness();
        let tab_id = h.session.active_tab_id().expect("active tab");
        h.surfaces
            .surface(tab_id)
            .expect("surface")
            .set_cross_origin(true);
        assert_eq!(h.session.find_in_page("x").total, 0);
    }

    #[test]
    fn test_toggle_pin_moves_tab() {
        let mut h = harness();
        let first = h.session.active_tab_id().expect("active tab");
        let second = h.session.create_tab("about:blank").expect("tab");

        assert!(h.session.toggle_pin(second).expect("pin"));
        assert_eq!(h.session.registry().display_order(), [second, first]);
        assert!(!h.session.tab(second).expect("tab").is_closable());

        assert!(!h.session.toggle_pin(second).expect("unpin"));
        assert_eq!(h.session.registry().display_order(), [first, second]);
    }

    #[test]
    fn test_bookmark_toggle_persists_once_per_toggle() {
        let mut h = harness();
        h.session.resolve_and_navigate("example.com").expect("navigate");
        let writes = h.store.write_count();

        assert!(h.session.toggle_current_bookmark().expect("toggle"));
        assert!(h.session.is_bookmarked("https://example.com"));
        assert_eq!(h.store.write_count(), writes + 1);

        assert!(!h.session.toggle_current_bookmark().expect("toggle"));
        assert!(h.session.bookmarks().is_empty());
        assert_eq!(h.store.write_count(), writes + 2);
        assert_eq!(h.store.value("bookmarks").as_deref(), Some("[]"));
    }

    #[test]
    fn test_bookmark_title_from_surface() {
        let mut h = harness();
        let tab_id = h.session.active_tab_id().expect("active tab");
        h.session.resolve_and_navigate("example.com").expect("navigate");
        h.surfaces
            .surface(tab_id)
            .expect("surface")
            .set_title(Some("Example"));

        h.session.toggle_current_bookmark().expect("toggle");
        assert_eq!(h.session.bookmarks()[0].title, "Example");
    }

    #[test]
    fn test_corrupt_bookmarks_are_reset() {
        let store = MemoryStore::new();
        store.set("bookmarks", "{{{").expect("seed");

        let h = harness_with(SessionOptions::new(), store);
        assert!(h.session.bookmarks().is_empty());
        assert_eq!(h.store.value("bookmarks"), None);
    }

    #[test]
    fn test_bookmarks_survive_restart() {
        let store = MemoryStore::new();
        {
            let mut h = harness_with(SessionOptions::new(), store.clone());
            h.session.toggle_bookmark("https://rust-lang.org").expect("toggle");
        }
        let h = harness_with(SessionOptions::new(), store);
        assert!(h.session.is_bookmarked("https://rust-lang.org/"));
    }

    #[test]
    fn test_clear_history() {
        let mut h = harness();
        h.session.resolve_and_navigate("a.com").expect("navigate");
        h.session.create_tab("about:blank").expect("tab");
        h.session.resolve_and_navigate("a.com").expect("navigate");
        h.session.resolve_and_navigate("b.com").expect("navigate");

        assert_eq!(
            h.session.history_entries(),
            ["https://a.com", "https://b.com"]
        );

        let state = h.session.clear_history();
        assert!(!state.can_go_back);
        assert!(h.session.history_entries().is_empty());
    }

    #[test]
    fn test_search_engine_and_theme_persist() {
        let mut h = harness();
        h.session.set_search_engine(SearchEngine::Google);
        let state = h.session.resolve_and_navigate("rust book").expect("navigate");
        assert_eq!(
            state.current_url.as_deref(),
            Some("https://www.google.com/search?q=rust%20book")
        );

        assert_eq!(h.session.theme(), Theme::Dark);
        assert_eq!(h.session.toggle_theme(), Theme::Light);
        assert_eq!(h.store.value(THEME_KEY).as_deref(), Some("light"));

        let restarted = harness_with(SessionOptions::new(), h.store.clone());
        assert_eq!(restarted.session.search_engine(), SearchEngine::Google);
        assert_eq!(restarted.session.theme(), Theme::Light);
    }

    #[test]
    fn test_reload_keeps_history() {
        let mut h = harness();
        let tab_id = h.session.active_tab_id().expect("active tab");
        h.session.resolve_and_navigate("a.com").expect("navigate");
        h.session.reload();

        let surface = h.surfaces.surface(tab_id).expect("surface");
        assert_eq!(surface.reload_count(), 1);
        assert_eq!(h.session.tab(tab_id).expect("tab").history().len(), 1);
    }

    #[test]
    fn test_groups() {
        let mut h = harness();
        let first = h.session.active_tab_id().expect("active tab");
        let second = h.session.create_tab("about:blank").expect("tab");
        let group = h.session.create_group();

        h.session.assign_group(second, Some(group)).expect("assign");
        h.session.assign_group(first, Some(group)).expect("assign");
        assert_eq!(h.session.group_members(group), [first, second]);

        h.session.close_tab(first).expect("close");
        assert_eq!(h.session.group_members(group), [second]);
    }

    #[test]
    fn test_dispose_detaches_everything() {
        let mut h = harness();
        let first = h.session.active_tab_id().expect("active tab");
        h.session.create_tab("about:blank").expect("tab");

        h.session.dispose();
        assert_eq!(h.session.tab_count(), 0);
        assert!(!h.session.is_initialized());
        assert!(h.surfaces.surface(first).expect("surface").is_detached());
    }
}
