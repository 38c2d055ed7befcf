//! # HTTP Source Pagination Engine
//!
//! Offset and pagination state management for tidemark sources that poll
//! external HTTP APIs. The engine tracks "where are we in this API's result
//! stream" across structurally different pagination protocols, builds the
//! continuation request, and selects the polling cadence — so a source can
//! resume after any restart exactly where it left off, without reprocessing
//! or silently skipping records.
//!
//! Supported protocols:
//!
//! - simple incrementing counters
//! - offset/limit
//! - opaque cursor tokens
//! - RFC 5988 `Link` headers
//! - `OData` `@odata.nextLink` / `@odata.deltaLink` semantics
//!
//! The engine performs no I/O and holds no credentials: the fetch layer
//! hands it an already-parsed [`ResponsePage`], and it hands back the next
//! request's path+query plus the new durable [`PaginationState`]. Transport,
//! retries, authentication and record emission belong to the surrounding
//! system.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use tidemark_connector::prelude::*;
//! use tidemark_connector_http::{offset_manager_for, HttpSourceConfig, ResponsePage};
//!
//! # fn main() -> SourceResult<()> {
//! let config = HttpSourceConfig::new("/api/items", PaginationKind::Cursor);
//! let manager = offset_manager_for(&config)?;
//!
//! // Restored offsets always win over the configured initial offset.
//! let state = manager.initialize(None);
//!
//! let page = ResponsePage::new(json!({"offset": "abc123", "items": []}));
//! let state = manager.update_from_response(&state, &page);
//!
//! assert!(manager.has_more_pages(&state));
//! assert_eq!(manager.build_next_request(&state), "/api/items?offset=abc123");
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`config`] - per-source static configuration
//! - [`offset`] - the `OffsetManager` contract and per-kind implementations
//! - [`interval`] - poll interval selection
//! - [`response`] - parsed response input type

pub mod config;
pub mod interval;
pub mod offset;
pub mod response;

pub use config::{HttpSourceConfig, PaginationConfig};
pub use interval::PollIntervalSelector;
pub use offset::{
    offset_manager_for, LinkHeaderOffsetManager, ODataOffsetManager, OffsetManager,
    ScalarOffsetManager,
};
pub use response::ResponsePage;
