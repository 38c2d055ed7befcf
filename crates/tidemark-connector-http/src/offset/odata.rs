//! `OData` offset management
//!
//! State machine over the `@odata.nextLink` / `@odata.deltaLink` convention:
//! a next link means more pages of the current result set, a delta link means
//! an already-caught-up incremental stream. Evaluated in fixed priority order
//! each cycle — next link first, then delta link, then exhausted — with the
//! link kind always recomputed from the response, never carried forward
//! stale.
//!
//! Two token encodings are supported per static configuration:
//!
//! - [`TokenExtractionMode::FullUrl`] stores the continuation URL's
//!   path+query verbatim (host discarded, re-supplied by the caller).
//! - [`TokenExtractionMode::TokenOnly`] stores only the decoded value of the
//!   skip-token or delta-token query parameter and re-attaches it to the
//!   configured base path.
//!
//! The decode-then-store (token-only) vs store-raw (full URL) asymmetry is
//! intentional: downstream consumers depend on the stored representation.

use tracing::{debug, warn};
use url::Url;

use tidemark_connector::state::PaginationState;
use tidemark_connector::types::{LinkKind, PaginationKind, TokenExtractionMode};

use crate::config::HttpSourceConfig;
use crate::response::ResponsePage;

use super::scalar::{append_query_param, extract_scalar};
use super::OffsetManager;

/// Offset manager for `OData` sources.
#[derive(Debug, Clone)]
pub struct ODataOffsetManager {
    base_path: String,
    initial_offset: Option<String>,
    next_link_pointer: String,
    delta_link_pointer: String,
    token_mode: TokenExtractionMode,
    skip_token_param: String,
    delta_token_param: String,
}

impl ODataOffsetManager {
    /// Build from a validated source configuration.
    pub fn from_config(config: &HttpSourceConfig) -> Self {
        let pagination = &config.pagination;
        Self {
            base_path: config.base_path.clone(),
            initial_offset: pagination.initial_offset().map(String::from),
            next_link_pointer: pagination.next_link_pointer.clone(),
            delta_link_pointer: pagination.delta_link_pointer.clone(),
            token_mode: pagination.token_mode,
            skip_token_param: pagination.skip_token_param.clone(),
            delta_token_param: pagination.delta_token_param.clone(),
        }
    }

    /// Reduce a continuation URL to a durable offset value.
    ///
    /// An unparsable URL degrades to the raw string rather than failing the
    /// cycle: a differently-shaped-but-still-useful continuation beats
    /// halting ingestion. In token-only mode a parsable URL without the
    /// expected token parameter yields `None`, which ends pagination like
    /// any other missing continuation field.
    fn derive_offset(&self, link: &str) -> Option<String> {
        match self.token_mode {
            TokenExtractionMode::FullUrl => Some(match Url::parse(link) {
                Ok(url) => match url.query() {
                    Some(query) => format!("{}?{}", url.path(), query),
                    None => url.path().to_string(),
                },
                Err(err) => {
                    warn!(link, error = %err, "Continuation link is not a valid URL, storing raw value");
                    link.to_string()
                }
            }),
            TokenExtractionMode::TokenOnly => match Url::parse(link) {
                Ok(url) => url
                    .query_pairs()
                    .find(|(name, _)| {
                        name == self.skip_token_param.as_str()
                            || name == self.delta_token_param.as_str()
                    })
                    .map(|(_, value)| value.into_owned()),
                Err(err) => {
                    warn!(link, error = %err, "Continuation link is not a valid URL, storing raw value");
                    Some(link.to_string())
                }
            },
        }
    }

    fn advance(&self, link_kind: LinkKind, link: &str) -> PaginationState {
        match self.derive_offset(link) {
            Some(offset) => {
                debug!(link_kind = %link_kind, "Continuation link found");
                PaginationState {
                    offset_value: Some(offset),
                    kind: PaginationKind::OData,
                    link_kind,
                    has_more: true,
                }
            }
            None => self.exhausted(),
        }
    }

    fn exhausted(&self) -> PaginationState {
        PaginationState {
            offset_value: None,
            kind: PaginationKind::OData,
            link_kind: LinkKind::Unknown,
            has_more: false,
        }
    }
}

impl OffsetManager for ODataOffsetManager {
    fn kind(&self) -> PaginationKind {
        PaginationKind::OData
    }

    fn initialize(&self, restored_offset: Option<&str>) -> PaginationState {
        let offset = restored_offset
            .map(String::from)
            .or_else(|| self.initial_offset.clone());

        PaginationState {
            offset_value: offset,
            kind: PaginationKind::OData,
            link_kind: LinkKind::Unknown,
            has_more: false,
        }
    }

    fn build_next_request(&self, state: &PaginationState) -> String {
        match self.token_mode {
            TokenExtractionMode::FullUrl => match state.offset() {
                // The stored offset already is a path+query.
                Some(offset) => offset.to_string(),
                None => self
                    .initial_offset
                    .clone()
                    .unwrap_or_else(|| self.base_path.clone()),
            },
            TokenExtractionMode::TokenOnly => match state.offset() {
                Some(token) => {
                    // The parameter name tracks which kind of link produced
                    // the stored value, not the value's shape. An unknown
                    // link kind with a surviving offset (restored state)
                    // replays with the skip-token parameter.
                    let param = match state.link_kind {
                        LinkKind::DeltaLink => &self.delta_token_param,
                        LinkKind::NextLink | LinkKind::Unknown => &self.skip_token_param,
                    };
                    append_query_param(&self.base_path, param, token)
                }
                None => self.base_path.clone(),
            },
        }
    }

    fn update_from_response(
        &self,
        _state: &PaginationState,
        response: &ResponsePage,
    ) -> PaginationState {
        let body = response.body();

        if let Some(link) = extract_scalar(body, &self.next_link_pointer) {
            return self.advance(LinkKind::NextLink, &link);
        }
        if let Some(link) = extract_scalar(body, &self.delta_link_pointer) {
            return self.advance(LinkKind::DeltaLink, &link);
        }
        self.exhausted()
    }
}
