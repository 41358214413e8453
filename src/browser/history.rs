//! Per-tab navigation history.
//!
//! A bounded, ordered log of visited URLs with a cursor. Pushing from the
//! middle of the stack discards the forward branch; the oldest entry is
//! evicted once the bound is exceeded.
//!
//! # Example
//!
//! ```
//! use tabshell::browser::{HistoryMove, HistoryStack};
//!
//! let mut history = HistoryStack::new(100);
//! history.push("https://a.test");
//! history.push("https://b.test");
//!
//! assert!(history.can_go_back());
//! assert_eq!(history.back(), HistoryMove::Moved("https://a.test".into()));
//! assert_eq!(history.back(), HistoryMove::Boundary);
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Default bound on entries per tab.
pub const MAX_HISTORY_ENTRIES: usize = 100;

// ============================================================================
// HistoryMove
// ============================================================================

/// Outcome of a cursor move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryMove {
    /// The cursor moved; carries the entry now under it.
    Moved(String),

    /// The cursor was already at the boundary. Nothing changed.
    Boundary,
}

impl HistoryMove {
    /// Returns the entry moved to, if any.
    #[inline]
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Moved(url) => Some(url),
            Self::Boundary => None,
        }
    }
}

// ============================================================================
// HistoryStack
// ============================================================================

/// Ordered navigation log with a cursor.
///
/// Invariants: the cursor is `None` exactly when the stack is empty, always
/// points at an existing entry otherwise, and `len() <= capacity()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStack {
    /// Visited URLs, oldest first.
    entries: Vec<String>,

    /// Index of the current entry.
    cursor: Option<usize>,

    /// Maximum number of entries retained.
    capacity: usize,
}

// ============================================================================
// HistoryStack - Constructors
// ============================================================================

impl HistoryStack {
    /// Creates an empty stack holding at most `capacity` entries.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    /// Rebuilds a stack from persisted entries.
    ///
    /// Oversized input keeps the newest entries. A missing or out-of-range
    /// cursor is clamped to the last entry.
    #[must_use]
    pub fn restore(entries: Vec<String>, cursor: Option<usize>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let overflow = entries.len().saturating_sub(capacity);
        let entries: Vec<String> = entries.into_iter().skip(overflow).collect();

        let cursor = if entries.is_empty() {
            None
        } else {
            let last = entries.len() - 1;
            Some(
                cursor
                    .map(|c| c.saturating_sub(overflow))
                    .unwrap_or(last)
                    .min(last),
            )
        };

        Self {
            entries,
            cursor,
            capacity,
        }
    }
}

// ============================================================================
// HistoryStack - Accessors
// ============================================================================

impl HistoryStack {
    /// Returns the entries, oldest first.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are recorded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the cursor position.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Returns the cursor in the signed form used by persisted state (-1 = empty).
    #[inline]
    #[must_use]
    pub fn index(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    /// Returns the entry under the cursor.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.cursor
            .and_then(|c| self.entries.get(c))
            .map(String::as_str)
    }

    /// Returns `true` if there is an entry before the cursor.
    #[inline]
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Returns `true` if there is an entry after the cursor.
    #[inline]
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }
}

// ============================================================================
// HistoryStack - Mutation
// ============================================================================

impl HistoryStack {
    /// Records a new navigation.
    ///
    /// Forward entries are discarded first. Pushing the URL already under
    /// the cursor is a no-op; only that single entry is compared.
    ///
    /// Returns `true` if an entry was appended.
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if url.is_empty() {
            return false;
        }

        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }

        if self.current() == Some(url.as_str()) {
            return false;
        }

        self.entries.push(url);
        self.cursor = Some(self.entries.len() - 1);

        if self.entries.len() > self.capacity {
            self.entries.remove(0);
            self.cursor = self.cursor.map(|c| c.saturating_sub(1));
        }

        true
    }

    /// Moves the cursor one entry back.
    pub fn back(&mut self) -> HistoryMove {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                HistoryMove::Moved(self.entries[c - 1].clone())
            }
            _ => HistoryMove::Boundary,
        }
    }

    /// Moves the cursor one entry forward.
    pub fn forward(&mut self) -> HistoryMove {
        match self.cursor {
            Some(c) if c + 1 < self.entries.len() => {
                self.cursor = Some(c + 1);
                HistoryMove::Moved(self.entries[c + 1].clone())
            }
            _ => HistoryMove::Boundary,
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(MAX_HISTORY_ENTRIES)
    }
}

// ============================================================================
// Tests
// ============================================================================
