//! Shared helpers for integration tests.

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use tabshell::{BrowserSession, HeadlessSurfaceFactory, KeyValueStore, SessionEvent, SessionOptions};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Logging
// ============================================================================

/// Installs a test subscriber once; later calls are ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tabshell=debug")),
        )
        .with_target(false)
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Session Fixture
// ============================================================================

/// Recorded session events.
pub type EventLog = Arc<Mutex<Vec<SessionEvent>>>;

/// Builds and initializes a session over the given store.
pub fn start_session(
    options: SessionOptions,
    store: impl KeyValueStore + 'static,
) -> anyhow::Result<(BrowserSession, HeadlessSurfaceFactory, EventLog)> {
    let surfaces = HeadlessSurfaceFactory::new();
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);

    let mut session = BrowserSession::builder()
        .options(options)
        .store(store)
        .surface_factory(surfaces.clone())
        .on_event(move |event| sink.lock().push(event.clone()))
        .build()?;
    session.init()?;

    Ok((session, surfaces, events))
}
