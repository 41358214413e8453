//! Find-in-page.
//!
//! Matching is a pure function over the text nodes of a document. A
//! [`FindSession`] holds the matches for one term and a selection cursor
//! that wraps in both directions.
//!
//! # Example
//!
//! ```
//! use tabshell::browser::{FindSession, TextNode};
//!
//! let nodes = vec![TextNode::new("Rust and rusty"), TextNode::new("trust")];
//! let mut find = FindSession::new("rust", &nodes);
//!
//! assert_eq!(find.len(), 3);
//! assert_eq!(find.current_index(), Some(0));
//! find.previous();
//! assert_eq!(find.current_index(), Some(2));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Elements whose text is never searched.
const SKIPPED_TAGS: [&str; 2] = ["script", "style"];

// ============================================================================
// TextNode
// ============================================================================

/// A run of document text and the element that contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    /// Text content.
    pub text: String,

    /// Tag name of the parent element, if known.
    pub parent_tag: Option<String>,
}

impl TextNode {
    /// Creates a text node with no known parent.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parent_tag: None,
        }
    }

    /// Sets the parent element tag.
    #[must_use]
    pub fn with_parent(mut self, tag: impl Into<String>) -> Self {
        self.parent_tag = Some(tag.into());
        self
    }

    /// Returns `false` for text inside `script` or `style`.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.parent_tag
            .as_deref()
            .is_none_or(|tag| !SKIPPED_TAGS.iter().any(|s| tag.eq_ignore_ascii_case(s)))
    }
}

// ============================================================================
// MatchSpan
// ============================================================================

/// Location of one match.
///
/// `start..end` is a byte range into the node's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchSpan {
    /// Index into the searched node sequence.
    pub node_index: usize,

    /// Byte offset of the first matched character.
    pub start: usize,

    /// Byte offset past the last matched character.
    pub end: usize,
}

// ============================================================================
// Matching
// ============================================================================

/// Finds every case-insensitive occurrence of `term`.
///
/// Matches may overlap: after a hit, scanning resumes one character past
/// its start. An empty term matches nothing.
#[must_use]
pub fn find_matches(nodes: &[TextNode], term: &str) -> Vec<MatchSpan> {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    for (node_index, node) in nodes.iter().enumerate() {
        if !node.is_searchable() {
            continue;
        }
        for (start, _) in node.text.char_indices() {
            if let Some(len) = match_len(&node.text[start..], &needle) {
                spans.push(MatchSpan {
                    node_index,
                    start,
                    end: start + len,
                });
            }
        }
    }
    spans
}

/// Returns the byte length of `haystack`'s prefix matching `needle`.
///
/// The match must end on a character boundary of `haystack`.
fn match_len(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut k = 0;
    for (offset, c) in haystack.char_indices() {
        for lower in c.to_lowercase() {
            if k == needle.len() || needle[k] != lower {
                return None;
            }
            k += 1;
        }
        if k == needle.len() {
            return Some(offset + c.len_utf8());
        }
    }
    None
}

// ============================================================================
// FindReport
// ============================================================================

/// Result counts for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FindReport {
    /// Number of matches.
    pub total: usize,

    /// Zero-based index of the selected match.
    pub current: Option<usize>,
}

impl fmt::Display for FindReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current {
            Some(i) => write!(f, "{} of {}", i + 1, self.total),
            None => f.write_str("No matches"),
        }
    }
}

// ============================================================================
// FindSession
// ============================================================================

/// Matches for one search term with a wrapping selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindSession {
    term: String,
    matches: Vec<MatchSpan>,
    current: Option<usize>,
}

impl FindSession {
    /// Searches `nodes` and selects the first match.
    #[must_use]
    pub fn new(term: impl Into<String>, nodes: &[TextNode]) -> Self {
        let term = term.into();
        let matches = find_matches(nodes, &term);
        let current = if matches.is_empty() { None } else { Some(0) };
        Self {
            term,
            matches,
            current,
        }
    }

    /// Returns the search term.
    #[inline]
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Returns all matches in document order.
    #[inline]
    #[must_use]
    pub fn matches(&self) -> &[MatchSpan] {
        &self.matches
    }

    /// Returns the number of matches.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if nothing matched.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns the selected match index.
    #[inline]
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Returns the selected match.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&MatchSpan> {
        self.current.and_then(|i| self.matches.get(i))
    }

    /// Selects the next match, wrapping to the first.
    pub fn next(&mut self) -> Option<&MatchSpan> {
        let len = self.matches.len();
        self.current = self.current.map(|i| (i + 1) % len);
        self.current()
    }

    /// Selects the previous match, wrapping to the last.
    pub fn previous(&mut self) -> Option<&MatchSpan> {
        let len = self.matches.len();
        self.current = self.current.map(|i| (i + len - 1) % len);
        self.current()
    }

    /// Returns counts for display.
    #[must_use]
    pub fn report(&self) -> FindReport {
        FindReport {
            total: self.matches.len(),
            current: self.current,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
