//! # Source Connector Framework
//!
//! Core abstractions for tidemark source connectors that repeatedly poll
//! external HTTP APIs and must resume, after any restart, exactly where they
//! left off.
//!
//! ## Architecture
//!
//! This crate carries the pieces every source kind shares:
//!
//! - [`PaginationState`] - the durable per-source record of "where are we in
//!   this API's result stream"
//! - [`OffsetStore`] - boundary trait to the external durable key-value store
//! - [`TemplateVariables`] - `${name}` placeholder substitution for URL and
//!   body templates
//! - [`IntervalConfig`] - polling cadence configuration
//! - [`SourceError`] - error taxonomy with transient/permanent classification
//!
//! Protocol-specific offset management (simple counters, offset/limit,
//! cursors, `Link` headers, `OData` links) lives in `tidemark-connector-http`.
//!
//! ## Example
//!
//! ```
//! use tidemark_connector::prelude::*;
//!
//! let state = PaginationState::with_offset(PaginationKind::Cursor, "abc123");
//! assert!(!state.is_exhausted());
//!
//! let url = TemplateVariables::new()
//!     .with("cursor", "abc123")
//!     .apply("/items?cursor=${cursor}");
//! assert_eq!(url, "/items?cursor=abc123");
//! ```
//!
//! ## Crate Organization
//!
//! - [`config`] - polling interval configuration
//! - [`error`] - error types with transient/permanent classification
//! - [`state`] - `PaginationState` and `SourcePartition`
//! - [`store`] - offset persistence boundary
//! - [`template`] - template variable replacement
//! - [`types`] - pagination kind and link kind enums

pub mod config;
pub mod error;
pub mod state;
pub mod store;
pub mod template;
pub mod types;

pub use config::IntervalConfig;
pub use error::{SourceError, SourceResult};
pub use state::{PaginationState, SourcePartition};
pub use store::{InMemoryOffsetStore, OffsetStore};
pub use template::TemplateVariables;
pub use types::{LinkKind, PaginationKind, TokenExtractionMode};

/// Prelude module for convenient imports.
///
/// ```
/// use tidemark_connector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::IntervalConfig;
    pub use crate::error::{SourceError, SourceResult};
    pub use crate::state::{PaginationState, SourcePartition};
    pub use crate::store::{InMemoryOffsetStore, OffsetStore};
    pub use crate::template::TemplateVariables;
    pub use crate::types::{LinkKind, PaginationKind, TokenExtractionMode};
}

// Re-export async_trait for offset store implementors
pub use async_trait::async_trait;
