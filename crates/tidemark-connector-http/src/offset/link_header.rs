//! RFC 5988 `Link` header offset management
//!
//! Continuation lives in the response's `Link` header rather than the body:
//! the target of the `rel="next"` entry is the next request, carried verbatim
//! as the offset. Absence of a `rel="next"` link ends pagination for the
//! cycle.

use tidemark_connector::state::PaginationState;
use tidemark_connector::types::{LinkKind, PaginationKind};

use crate::config::HttpSourceConfig;
use crate::response::ResponsePage;

use super::OffsetManager;

/// Name of the header carrying pagination links.
const LINK_HEADER: &str = "Link";

/// Find the target of the `rel="next"` entry in a `Link` header value.
///
/// Handles multi-entry headers, quoted and unquoted `rel` values, and
/// multi-relation values (`rel="next last"`). Targets are bracketed per
/// RFC 5988, so commas inside URLs do not split entries.
pub(crate) fn next_link(header: &str) -> Option<String> {
    let mut rest = header;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = after.find('>')?;
        let target = &after[..end];
        let tail = &after[end + 1..];

        // Parameters run until the next bracketed target.
        let params_end = tail.find('<').unwrap_or(tail.len());
        let params = &tail[..params_end];

        if has_next_rel(params) {
            return Some(target.to_string());
        }
        rest = &tail[params_end..];
    }

    None
}

fn has_next_rel(params: &str) -> bool {
    params
        .split(';')
        .filter_map(|param| {
            let param = param.trim().trim_end_matches(',');
            param
                .strip_prefix("rel=")
                .or_else(|| param.strip_prefix("REL="))
        })
        .any(|value| {
            value
                .trim_matches('"')
                .split_whitespace()
                .any(|rel| rel.eq_ignore_ascii_case("next"))
        })
}

/// Offset manager for sources paginating via the `Link` response header.
#[derive(Debug, Clone)]
pub struct LinkHeaderOffsetManager {
    base_path: String,
    initial_offset: Option<String>,
}

impl LinkHeaderOffsetManager {
    /// Build from a validated source configuration.
    pub fn from_config(config: &HttpSourceConfig) -> Self {
        Self {
            base_path: config.base_path.clone(),
            initial_offset: config.pagination.initial_offset().map(String::from),
        }
    }
}

impl OffsetManager for LinkHeaderOffsetManager {
    fn kind(&self) -> PaginationKind {
        PaginationKind::LinkHeader
    }

    fn initialize(&self, restored_offset: Option<&str>) -> PaginationState {
        let offset = restored_offset
            .map(String::from)
            .or_else(|| self.initial_offset.clone());

        PaginationState {
            offset_value: offset,
            kind: PaginationKind::LinkHeader,
            link_kind: LinkKind::Unknown,
            has_more: false,
        }
    }

    fn build_next_request(&self, state: &PaginationState) -> String {
        match state.offset() {
            // The stored offset is the full rel="next" target; replay it.
            Some(offset) => offset.to_string(),
            None => self.base_path.clone(),
        }
    }

    fn update_from_response(
        &self,
        state: &PaginationState,
        response: &ResponsePage,
    ) -> PaginationState {
        let offset = response.header(LINK_HEADER).and_then(next_link);
        let has_more = offset.is_some();

        PaginationState {
            offset_value: offset,
            kind: state.kind,
            link_kind: LinkKind::Unknown,
            has_more,
        }
    }
}
