//! Connector framework type definitions
//!
//! Enums describing how an HTTP API source paginates and how continuation
//! tokens are extracted from OData links.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pagination protocol spoken by an API source.
///
/// Set once from static configuration when the source is constructed and
/// immutable for the life of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationKind {
    /// Simple incrementing counter carried in a query parameter.
    SimpleIncrementing,
    /// Offset/limit pagination (offset=200, limit=100).
    OffsetLimit,
    /// Opaque cursor token read from a response field.
    Cursor,
    /// RFC 5988 `Link` response header with `rel="next"`.
    LinkHeader,
    /// Timestamp field of the last record, replayed as a query parameter.
    Timestamp,
    /// `OData` `@odata.nextLink` / `@odata.deltaLink` semantics.
    OData,
}

impl PaginationKind {
    /// Get all supported pagination kinds.
    #[must_use]
    pub fn all() -> &'static [PaginationKind] {
        &[
            PaginationKind::SimpleIncrementing,
            PaginationKind::OffsetLimit,
            PaginationKind::Cursor,
            PaginationKind::LinkHeader,
            PaginationKind::Timestamp,
            PaginationKind::OData,
        ]
    }

    /// Get the string representation used in configuration.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PaginationKind::SimpleIncrementing => "simple_incrementing",
            PaginationKind::OffsetLimit => "offset_limit",
            PaginationKind::Cursor => "cursor",
            PaginationKind::LinkHeader => "link_header",
            PaginationKind::Timestamp => "timestamp",
            PaginationKind::OData => "odata",
        }
    }
}

impl fmt::Display for PaginationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaginationKind {
    type Err = ParsePaginationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple_incrementing" => Ok(PaginationKind::SimpleIncrementing),
            "offset_limit" => Ok(PaginationKind::OffsetLimit),
            "cursor" => Ok(PaginationKind::Cursor),
            "link_header" => Ok(PaginationKind::LinkHeader),
            "timestamp" => Ok(PaginationKind::Timestamp),
            "odata" => Ok(PaginationKind::OData),
            _ => Err(ParsePaginationKindError(s.to_string())),
        }
    }
}

/// Error parsing pagination kind from string.
#[derive(Debug, Clone)]
pub struct ParsePaginationKindError(String);

impl fmt::Display for ParsePaginationKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid pagination kind '{}', expected one of: simple_incrementing, \
             offset_limit, cursor, link_header, timestamp, odata",
            self.0
        )
    }
}

impl std::error::Error for ParsePaginationKindError {}

/// Which kind of `OData` continuation link produced the current offset.
///
/// Only meaningful for [`PaginationKind::OData`] sources. Recomputed from the
/// response on every cycle; a response with neither link resets it to
/// [`LinkKind::Unknown`] rather than carrying the previous value forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `@odata.nextLink` — more pages of the current result set.
    NextLink,
    /// `@odata.deltaLink` — incremental changes since the last full sync.
    DeltaLink,
    /// No continuation link seen yet (initial state or exhausted).
    #[default]
    Unknown,
}

impl LinkKind {
    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::NextLink => "next_link",
            LinkKind::DeltaLink => "delta_link",
            LinkKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an `OData` continuation URL is reduced to a durable offset value.
///
/// A static per-source configuration choice, never derived at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenExtractionMode {
    /// Store the continuation URL's path + query verbatim and replay it as
    /// the next request. Scheme and host are discarded; the caller re-supplies
    /// the base host on replay.
    #[default]
    FullUrl,
    /// Store only the decoded value of the configured skip-token or
    /// delta-token query parameter and re-attach it to the configured base
    /// path on the next request.
    TokenOnly,
}

impl TokenExtractionMode {
    /// Get the string representation used in configuration.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenExtractionMode::FullUrl => "full_url",
            TokenExtractionMode::TokenOnly => "token_only",
        }
    }
}

impl fmt::Display for TokenExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
