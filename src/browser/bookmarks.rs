//! Bookmark collection.
//!
//! Bookmarks are keyed by normalized URL and persisted as a JSON array of
//! `[url, { "title": ..., "addedDate": ... }]` pairs.

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Storage key of the serialized bookmark list.
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Markup stripped from titles before they are stored.
static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup regex"));

// ============================================================================
// Bookmark
// ============================================================================

/// A bookmarked page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// Normalized URL.
    pub url: String,

    /// Page title.
    pub title: String,

    /// When the bookmark was added.
    pub added_date: DateTime<Utc>,
}

/// Persisted value half of a bookmark pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookmarkRecord {
    title: String,
    #[serde(rename = "addedDate")]
    added_date: DateTime<Utc>,
}

// ============================================================================
// BookmarkToggle
// ============================================================================

/// Outcome of toggling a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkToggle {
    /// The URL is now bookmarked.
    Added,

    /// The URL is no longer bookmarked.
    Removed,
}

impl BookmarkToggle {
    /// Returns `true` if the URL is bookmarked after the toggle.
    #[inline]
    #[must_use]
    pub fn is_bookmarked(&self) -> bool {
        matches!(self, Self::Added)
    }
}

// ============================================================================
// Bookmarks
// ============================================================================

/// Set of bookmarks, at most one per URL, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmarks {
    entries: Vec<Bookmark>,
}

impl Bookmarks {
    /// Creates an empty collection.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bookmarks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no bookmarks.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the URL is bookmarked.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        let key = normalize_url(url);
        self.entries.iter().any(|b| b.url == key)
    }

    /// Returns a bookmark by URL.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&Bookmark> {
        let key = normalize_url(url);
        self.entries.iter().find(|b| b.url == key)
    }

    /// Returns bookmarks, newest first.
    #[must_use]
    pub fn newest_first(&self) -> Vec<&Bookmark> {
        let mut sorted: Vec<&Bookmark> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.added_date.cmp(&a.added_date));
        sorted
    }

    /// Adds the URL if absent, removes it if present.
    pub fn toggle(&mut self, url: &str, title: &str) -> BookmarkToggle {
        self.toggle_at(url, title, Utc::now())
    }

    /// Toggles with an explicit timestamp.
    pub fn toggle_at(&mut self, url: &str, title: &str, now: DateTime<Utc>) -> BookmarkToggle {
        let key = normalize_url(url);

        if let Some(pos) = self.entries.iter().position(|b| b.url == key) {
            self.entries.remove(pos);
            debug!(url = %key, "Bookmark removed");
            return BookmarkToggle::Removed;
        }

        self.entries.push(Bookmark {
            url: key.clone(),
            title: sanitize_title(title),
            added_date: now,
        });
        debug!(url = %key, "Bookmark added");
        BookmarkToggle::Added
    }
}

// ============================================================================
// Bookmarks - Persistence
// ============================================================================

impl Bookmarks {
    /// Serializes to the persisted pair-array format.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let pairs: Vec<(&str, BookmarkRecord)> = self
            .entries
            .iter()
            .map(|b| {
                (
                    b.url.as_str(),
                    BookmarkRecord {
                        title: b.title.clone(),
                        added_date: b.added_date,
                    },
                )
            })
            .collect();
        Ok(serde_json::to_string(&pairs)?)
    }

    /// Parses the persisted pair-array format.
    ///
    /// Entries of the wrong shape are skipped; a missing or unreadable
    /// date defaults to now. Non-array JSON yields an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if the text is not JSON at all.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let mut bookmarks = Self::new();

        let Value::Array(items) = value else {
            return Ok(bookmarks);
        };

        for item in items {
            let Some((url, record)) = parse_pair(&item) else {
                trace!(item = %item, "Skipping malformed bookmark");
                continue;
            };
            let key = normalize_url(&url);
            if bookmarks.entries.iter().any(|b| b.url == key) {
                continue;
            }
            bookmarks.entries.push(Bookmark {
                url: key,
                title: sanitize_title(&record.0),
                added_date: record.1,
            });
        }

        Ok(bookmarks)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Extracts `(url, (title, date))` from a persisted pair.
fn parse_pair(item: &Value) -> Option<(String, (String, DateTime<Utc>))> {
    let pair = item.as_array()?;
    let url = pair.first()?.as_str()?;
    let data = pair.get(1)?.as_object()?;
    let title = data.get("title")?.as_str()?;
    let added = data
        .get("addedDate")
        .and_then(parse_date)
        .unwrap_or_else(Utc::now);
    Some((url.to_string(), (title.to_string(), added)))
}

/// Reads an RFC 3339 string or a millisecond timestamp.
fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// Normalizes a URL for use as a bookmark key.
///
/// Unparsable input is kept as trimmed text.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    Url::parse(trimmed).map_or_else(|_| trimmed.to_string(), |u| u.to_string())
}

/// Strips markup from a page title.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    MARKUP.replace_all(title, "").trim().to_string()
}

// ============================================================================
// Tests
// ============================================================================
