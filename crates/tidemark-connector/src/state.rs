//! Pagination state and source partition identity
//!
//! [`PaginationState`] is the unit of durability: everything the engine needs
//! to resume a source exactly where it left off after a restart.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{LinkKind, PaginationKind};

/// Durable per-source pagination state.
///
/// Created once at source start (from the offset store if a prior state
/// exists, otherwise from configuration), mutated exactly once per polling
/// cycle, and never shared between sources.
///
/// Invariant: `offset_value == None` together with `has_more == false` means
/// pagination is exhausted for this cycle and the next poll starts from the
/// base request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Opaque continuation value; semantics depend on `kind`.
    pub offset_value: Option<String>,

    /// Pagination protocol of the source. Immutable for the source's life.
    pub kind: PaginationKind,

    /// Which `OData` link produced `offset_value`. Only meaningful when
    /// `kind == PaginationKind::OData`; recomputed every cycle.
    #[serde(default)]
    pub link_kind: LinkKind,

    /// True if another request should follow immediately rather than waiting
    /// for the next scheduled poll.
    #[serde(default)]
    pub has_more: bool,
}

impl PaginationState {
    /// Create the initial state for a source with no offset yet.
    pub fn new(kind: PaginationKind) -> Self {
        Self {
            offset_value: None,
            kind,
            link_kind: LinkKind::Unknown,
            has_more: false,
        }
    }

    /// Create a state seeded with an offset value.
    pub fn with_offset(kind: PaginationKind, offset: impl Into<String>) -> Self {
        Self {
            offset_value: Some(offset.into()),
            kind,
            link_kind: LinkKind::Unknown,
            has_more: false,
        }
    }

    /// Check whether pagination is exhausted for this cycle.
    pub fn is_exhausted(&self) -> bool {
        self.offset_value.is_none() && !self.has_more
    }

    /// Get the offset value as a string slice, if present.
    pub fn offset(&self) -> Option<&str> {
        self.offset_value.as_deref()
    }
}

/// Stable key addressing one source's offset state in the external store.
///
/// Supplied by the caller (typically the source's full base URL) and must
/// remain constant across restarts for resumption to work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcePartition(String);

impl SourcePartition {
    /// Create a source partition key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourcePartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SourcePartition {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for SourcePartition {
    fn from(key: String) -> Self {
        Self(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_exhausted() {
        let state = PaginationState::new(PaginationKind::Cursor);
        assert!(state.is_exhausted());
        assert_eq!(state.link_kind, LinkKind::Unknown);
    }

    #[test]
    fn test_state_with_offset_is_not_exhausted() {
        let state = PaginationState::with_offset(PaginationKind::Cursor, "abc");
        assert!(!state.is_exhausted());
        assert_eq!(state.offset(), Some("abc"));
    }

    #[test]
    fn test_state_serde_roundtrip() {
        let state = PaginationState::with_offset(PaginationKind::OData, "/api/items?$skiptoken=x");
        let json = serde_json::to_string(&state).unwrap();
        let parsed: PaginationState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_source_partition_display() {
        let partition = SourcePartition::new("https://api.example.com/v1/items");
        assert_eq!(partition.to_string(), "https://api.example.com/v1/items");
        assert_eq!(partition.as_str(), "https://api.example.com/v1/items");
    }
}
