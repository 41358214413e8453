//! End-to-end browser session flows.

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::{init_logging, start_session};
use tabshell::browser::{MAX_TABS, SessionEvent};
use tabshell::{Error, FileStore, KeyValueStore, MemoryStore, SearchEngine, SessionOptions, Theme};

// ============================================================================
// Tests
// ============================================================================

#[test]
fn browsing_across_tabs() -> anyhow::Result<()> {
    init_logging();
    let (mut session, surfaces, _events) = start_session(SessionOptions::new(), MemoryStore::new())?;

    let first = session.active_tab_id().expect("first tab");
    session.resolve_and_navigate("rust-lang.org")?;
    session.resolve_and_navigate("https://docs.rs/tokio")?;

    let second = session.create_tab("https://crates.io")?;
    assert_eq!(session.active_tab_id(), Some(second));
    assert_eq!(
        session.nav_state().current_url.as_deref(),
        Some("https://crates.io")
    );

    let state = session.switch_tab(first);
    assert!(state.can_go_back);
    assert_eq!(state.current_url.as_deref(), Some("https://docs.rs/tokio"));

    let state = session.go_back();
    assert_eq!(state.current_url.as_deref(), Some("https://rust-lang.org"));
    assert!(state.can_go_forward);

    let loads = surfaces.surface(first).expect("surface").loads();
    assert_eq!(loads.last().map(String::as_str), Some("https://rust-lang.org"));

    assert_eq!(
        session.history_entries(),
        [
            "https://rust-lang.org",
            "https://docs.rs/tokio",
            "https://crates.io"
        ]
    );
    Ok(())
}

#[test]
fn closing_every_tab_then_typing_opens_a_new_one() -> anyhow::Result<()> {
    init_logging();
    let (mut session, surfaces, events) = start_session(SessionOptions::new(), MemoryStore::new())?;

    let only = session.active_tab_id().expect("tab");
    let state = session.close_tab(only)?;
    assert_eq!(state.active_tab, None);
    assert!(surfaces.surface(only).expect("surface").is_detached());

    let state = session.resolve_and_navigate("example.com")?;
    assert_eq!(session.tab_count(), 1);
    assert_eq!(state.current_url.as_deref(), Some("https://example.com"));

    let closed = events
        .lock()
        .iter()
        .filter(|e| matches!(e, SessionEvent::TabClosed { .. }))
        .count();
    assert_eq!(closed, 1);
    Ok(())
}

#[test]
fn tab_limit_is_reported() -> anyhow::Result<()> {
    init_logging();
    let (mut session, _surfaces, events) = start_session(SessionOptions::new(), MemoryStore::new())?;

    for _ in 1..MAX_TABS {
        session.create_tab("about:blank")?;
    }
    let result = session.create_tab("about:blank");

    assert!(matches!(result, Err(Error::CapacityExceeded { limit }) if limit == MAX_TABS));
    assert_eq!(session.tab_count(), MAX_TABS);
    assert!(
        events
            .lock()
            .iter()
            .any(|e| matches!(e, SessionEvent::CapacityExceeded { .. }))
    );
    Ok(())
}

#[test]
fn state_survives_restart() -> anyhow::Result<()> {
    init_logging();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("shell.json");

    {
        let (mut session, _surfaces, _events) =
            start_session(SessionOptions::new(), FileStore::open(&path)?)?;
        session.resolve_and_navigate("example.com")?;
        assert!(session.toggle_current_bookmark()?);
        assert_eq!(session.toggle_theme(), Theme::Light);
        session.set_search_engine(SearchEngine::DuckDuckGo);
        session.dispose();
    }

    let (mut session, _surfaces, events) =
        start_session(SessionOptions::new(), FileStore::open(&path)?)?;

    assert_eq!(session.theme(), Theme::Light);
    assert_eq!(session.search_engine(), SearchEngine::DuckDuckGo);
    assert!(session.is_bookmarked("https://example.com"));
    assert_eq!(session.bookmarks().len(), 1);
    assert!(
        events
            .lock()
            .contains(&SessionEvent::ThemeChanged(Theme::Light))
    );

    let state = session.resolve_and_navigate("hello world")?;
    assert_eq!(
        state.current_url.as_deref(),
        Some("https://duckduckgo.com/?q=hello%20world")
    );
    Ok(())
}

#[test]
fn corrupt_bookmarks_are_discarded() -> anyhow::Result<()> {
    init_logging();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("shell.json");
    std::fs::write(&path, r#"{"bookmarks":"{not json"}"#)?;

    let (session, _surfaces, _events) =
        start_session(SessionOptions::new(), FileStore::open(&path)?)?;
    assert!(session.bookmarks().is_empty());

    let reopened = FileStore::open(&path)?;
    assert_eq!(reopened.get("bookmarks")?, None);
    Ok(())
}
