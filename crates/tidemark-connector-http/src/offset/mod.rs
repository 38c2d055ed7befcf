//! Offset management
//!
//! One [`OffsetManager`] implementation per pagination kind, all exposing the
//! same contract: given the previous [`PaginationState`] and a parsed
//! response, compute the next request's path+query and the new durable state.
//!
//! Managers are pure and perform no I/O. A missing continuation field is
//! end-of-pagination, never an error; a malformed continuation URL degrades
//! to carrying the raw string forward rather than failing the cycle.

mod link_header;
mod odata;
mod scalar;

pub use link_header::LinkHeaderOffsetManager;
pub use odata::ODataOffsetManager;
pub use scalar::ScalarOffsetManager;

use tidemark_connector::error::SourceResult;
use tidemark_connector::state::PaginationState;
use tidemark_connector::types::PaginationKind;

use crate::config::HttpSourceConfig;
use crate::response::ResponsePage;

/// Common contract for all pagination kinds.
///
/// Implementations are selected once at source construction from static
/// configuration via [`offset_manager_for`] and never re-evaluated per cycle.
pub trait OffsetManager: std::fmt::Debug + Send + Sync {
    /// The pagination kind this manager handles.
    fn kind(&self) -> PaginationKind;

    /// Build the initial state for a source.
    ///
    /// A restored offset from the durable store always wins over the
    /// statically configured initial offset: resumption correctness over
    /// convenience.
    fn initialize(&self, restored_offset: Option<&str>) -> PaginationState;

    /// Build the next request's path+query.
    ///
    /// Deterministic function of state and static configuration only — no
    /// I/O, no randomness.
    fn build_next_request(&self, state: &PaginationState) -> String;

    /// Fold a fetched response into a new state.
    ///
    /// Pure: either fully applies or (conceptually) leaves the prior state
    /// untouched — the input state is never mutated. Never fails on absent
    /// continuation fields.
    fn update_from_response(&self, state: &PaginationState, response: &ResponsePage)
        -> PaginationState;

    /// Whether another request should follow immediately.
    fn has_more_pages(&self, state: &PaginationState) -> bool {
        state.has_more
    }

    /// Restore the statically configured initial offset.
    ///
    /// Used only by external administrative action, never by normal polling.
    fn reset_offset(&self) -> PaginationState {
        self.initialize(None)
    }
}

/// Construct the offset manager for a source configuration.
///
/// Fails fast on invalid configuration, before any polling starts.
///
/// # Errors
///
/// Returns [`SourceError::InvalidConfiguration`] when the configuration does
/// not validate.
///
/// [`SourceError::InvalidConfiguration`]: tidemark_connector::error::SourceError::InvalidConfiguration
pub fn offset_manager_for(config: &HttpSourceConfig) -> SourceResult<Box<dyn OffsetManager>> {
    config.validate()?;

    Ok(match config.pagination.kind {
        PaginationKind::SimpleIncrementing
        | PaginationKind::OffsetLimit
        | PaginationKind::Cursor
        | PaginationKind::Timestamp => Box::new(ScalarOffsetManager::from_config(config)),
        PaginationKind::LinkHeader => Box::new(LinkHeaderOffsetManager::from_config(config)),
        PaginationKind::OData => Box::new(ODataOffsetManager::from_config(config)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaginationConfig;

    #[test]
    fn test_factory_dispatches_on_kind() {
        for kind in PaginationKind::all() {
            let config = HttpSourceConfig::new("/api/items", *kind);
            let manager = offset_manager_for(&config).unwrap();
            assert_eq!(manager.kind(), *kind);
        }
    }

    #[test]
    fn test_factory_fails_fast_on_invalid_config() {
        let config = HttpSourceConfig::new("/api/items", PaginationKind::Cursor).with_pagination(
            PaginationConfig::new(PaginationKind::Cursor).with_offset_pointer("no-slash"),
        );
        let err = offset_manager_for(&config).unwrap_err();
        assert!(err.is_permanent());
    }
}
