//! Persisted user settings.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::resolver::SearchEngine;

use super::KeyValueStore;

// ============================================================================
// Constants
// ============================================================================

/// Storage key of the selected search engine.
pub const SEARCH_ENGINE_KEY: &str = "searchEngine";

/// Storage key of the theme.
pub const THEME_KEY: &str = "theme";

// ============================================================================
// Theme
// ============================================================================

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    Light,

    /// Dark theme.
    #[default]
    Dark,
}

impl Theme {
    /// Returns the persisted name.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Returns the other theme.
    #[inline]
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::config(format!("unknown theme '{other}'"))),
        }
    }
}

// ============================================================================
// Preferences
// ============================================================================

/// User settings read from a [`KeyValueStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    /// Engine used for search fallback.
    pub search_engine: SearchEngine,

    /// Color theme.
    pub theme: Theme,
}

impl Preferences {
    /// Creates preferences with the given engine and the default theme.
    #[must_use]
    pub fn new(search_engine: SearchEngine) -> Self {
        Self {
            search_engine,
            theme: Theme::default(),
        }
    }

    /// Loads preferences, keeping `defaults` for anything absent or unreadable.
    #[must_use]
    pub fn load(store: &dyn KeyValueStore, defaults: Self) -> Self {
        let search_engine = read(store, SEARCH_ENGINE_KEY).unwrap_or(defaults.search_engine);
        let theme = read(store, THEME_KEY).unwrap_or(defaults.theme);

        debug!(search_engine = %search_engine, theme = %theme, "Preferences loaded");
        Self {
            search_engine,
            theme,
        }
    }

    /// Stores the search engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save_search_engine(
        &mut self,
        store: &dyn KeyValueStore,
        engine: SearchEngine,
    ) -> Result<()> {
        self.search_engine = engine;
        store.set(SEARCH_ENGINE_KEY, engine.as_str())
    }

    /// Stores the theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save_theme(&mut self, store: &dyn KeyValueStore, theme: Theme) -> Result<()> {
        self.theme = theme;
        store.set(THEME_KEY, theme.as_str())
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new(SearchEngine::default())
    }
}

/// Reads and parses one key, logging anything unusable.
fn read<T>(store: &dyn KeyValueStore, key: &str) -> Option<T>
where
    T: FromStr<Err = Error>,
{
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(key, error = %e, "Failed to read preference");
            return None;
        }
    };

    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "Ignoring unknown preference value");
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::{Preferences, SEARCH_ENGINE_KEY, THEME_KEY, Theme};
    use crate::resolver::SearchEngine;
    use crate::storage::{KeyValueStore, MemoryStore};

    #[test]
    fn test_defaults_when_empty() {
        let store = MemoryStore::new();
        let prefs = Preferences::load(&store, Preferences::default());
        assert_eq!(prefs.search_engine, SearchEngine::Brave);
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[test]
    fn test_unknown_engine_falls_back() {
        let store = MemoryStore::new();
        store.set(SEARCH_ENGINE_KEY, "altavista").expect("set");
        store.set(THEME_KEY, "light").expect("set");

        let prefs = Preferences::load(&store, Preferences::new(SearchEngine::Google));
        assert_eq!(prefs.search_engine, SearchEngine::Google);
        assert_eq!(prefs.theme, Theme::Light);
    }

    #[test]
    fn test_save_round_trip() {
        let store = MemoryStore::new();
        let mut prefs = Preferences::default();
        prefs
            .save_search_engine(&store, SearchEngine::DuckDuckGo)
            .expect("save engine");
        prefs.save_theme(&store, Theme::Light).expect("save theme");

        assert_eq!(store.value(SEARCH_ENGINE_KEY).as_deref(), Some("duckduckgo"));
        assert_eq!(Preferences::load(&store, Preferences::default()), prefs);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().to_string(), "light");
    }
}
