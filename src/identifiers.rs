//! Type-safe identifiers for session entities.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time.
//!
//! | Type | Backing | Source |
//! |------|---------|--------|
//! | [`TabId`] | `u64` | Process-wide monotonic counter |
//! | [`GroupId`] | `Uuid` | Random v4 |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

/// Next tab ID to hand out. Zero is never issued.
static NEXT_TAB_ID: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// TabId
// ============================================================================

/// Unique identifier of a tab.
///
/// IDs are monotonic within a process; uniqueness is the only contract
/// callers may rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    /// Generates a fresh tab ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(NEXT_TAB_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps a raw ID value, e.g. one restored from storage.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw ID value.
    #[inline]
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab{}", self.0)
    }
}

// ============================================================================
// GroupId
// ============================================================================

/// Identifier of a tab group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
    /// Generates a random group ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for GroupId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group-{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::{GroupId, TabId};

    #[test]
    fn test_tab_ids_are_unique() {
        let a = TabId::generate();
        let b = TabId::generate();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_tab_id_display() {
        assert_eq!(TabId::from_raw(42).to_string(), "tab42");
    }

    #[test]
    fn test_tab_id_serde_transparent() {
        let json = serde_json::to_string(&TabId::from_raw(3)).expect("serialize");
        assert_eq!(json, "3");
    }

    #[test]
    fn test_group_ids_are_unique() {
        assert_ne!(GroupId::generate(), GroupId::generate());
    }
}
