//! Scalar offset management
//!
//! One generic extract-and-substitute manager serving the four simple
//! pagination kinds (simple incrementing, offset/limit, cursor, timestamp).
//! They differ only in where the continuation value is read from and how it
//! is re-injected, so they share this single implementation instead of four
//! parallel near-duplicates.

use serde_json::Value;
use tidemark_connector::state::PaginationState;
use tidemark_connector::template::TemplateVariables;
use tidemark_connector::types::{LinkKind, PaginationKind};

use crate::config::HttpSourceConfig;
use crate::response::ResponsePage;

use super::OffsetManager;

/// Placeholder recognized in base path templates.
pub(crate) const OFFSET_VARIABLE: &str = "${offset}";

/// Resolve a JSON pointer to a scalar continuation value.
///
/// Strings are carried verbatim; numbers and booleans are stringified.
/// An absent field, an empty string, `null`, or a non-scalar all mean
/// "no continuation value".
pub(crate) fn extract_scalar(body: &Value, pointer: &str) -> Option<String> {
    match body.pointer(pointer)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Append `name=value` to a path+query string, URL-encoding the value.
pub(crate) fn append_query_param(path: &str, name: &str, value: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{name}={}", urlencoding::encode(value))
}

/// Offset manager for pagination kinds that carry one scalar continuation
/// value from a response field into a query parameter.
#[derive(Debug, Clone)]
pub struct ScalarOffsetManager {
    kind: PaginationKind,
    base_path: String,
    initial_offset: Option<String>,
    offset_pointer: String,
    offset_param: String,
    /// Page-size parameter, re-applied on every request for offset/limit
    /// sources since the limit is not carried in state.
    size_param: Option<String>,
    page_size: u32,
}

impl ScalarOffsetManager {
    /// Build from a validated source configuration.
    pub fn from_config(config: &HttpSourceConfig) -> Self {
        let pagination = &config.pagination;
        let size_param = match pagination.kind {
            PaginationKind::OffsetLimit => Some(pagination.size_param.clone()),
            _ => None,
        };

        Self {
            kind: pagination.kind,
            base_path: config.base_path.clone(),
            initial_offset: pagination.initial_offset().map(String::from),
            offset_pointer: pagination.offset_pointer.clone(),
            offset_param: pagination.offset_param.clone(),
            size_param,
            page_size: pagination.page_size,
        }
    }
}

impl OffsetManager for ScalarOffsetManager {
    fn kind(&self) -> PaginationKind {
        self.kind
    }

    fn initialize(&self, restored_offset: Option<&str>) -> PaginationState {
        let offset = restored_offset
            .map(String::from)
            .or_else(|| self.initial_offset.clone());

        PaginationState {
            offset_value: offset,
            kind: self.kind,
            link_kind: LinkKind::Unknown,
            has_more: false,
        }
    }

    fn build_next_request(&self, state: &PaginationState) -> String {
        let mut url = self.base_path.clone();

        if let Some(offset) = state.offset() {
            if url.contains(OFFSET_VARIABLE) {
                // Template substitution happens on the raw string, before
                // any URL parsing downstream.
                url = TemplateVariables::new().with("offset", offset).apply(&url);
            } else {
                url = append_query_param(&url, &self.offset_param, offset);
            }
        }

        if let Some(ref size_param) = self.size_param {
            url = append_query_param(&url, size_param, &self.page_size.to_string());
        }

        url
    }

    fn update_from_response(
        &self,
        state: &PaginationState,
        response: &ResponsePage,
    ) -> PaginationState {
        let offset = extract_scalar(response.body(), &self.offset_pointer);
        let has_more = offset.is_some();

        PaginationState {
            offset_value: offset,
            kind: state.kind,
            link_kind: LinkKind::Unknown,
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaginationConfig;
    use serde_json::json;

    fn cursor_manager() -> ScalarOffsetManager {
        let config = HttpSourceConfig::new("/api/items", PaginationKind::Cursor).with_pagination(
            PaginationConfig::new(PaginationKind::Cursor)
                .with_offset_pointer("/meta/next_cursor")
                .with_offset_param("cursor"),
        );
        ScalarOffsetManager::from_config(&config)
    }

    #[test]
    fn test_extract_scalar_variants() {
        let body = json!({
            "next": "abc",
            "page": 7,
            "empty": "",
            "absent_parent": null,
            "nested": {"cursor": "deep"}
        });

        assert_eq!(extract_scalar(&body, "/next"), Some("abc".to_string()));
        assert_eq!(extract_scalar(&body, "/page"), Some("7".to_string()));
        assert_eq!(extract_scalar(&body, "/empty"), None);
        assert_eq!(extract_scalar(&body, "/missing"), None);
        assert_eq!(extract_scalar(&body, "/absent_parent"), None);
        assert_eq!(
            extract_scalar(&body, "/nested/cursor"),
            Some("deep".to_string())
        );
    }

    #[test]
    fn test_append_query_param_separator() {
        assert_eq!(append_query_param("/items", "page", "2"), "/items?page=2");
        assert_eq!(
            append_query_param("/items?limit=10", "page", "2"),
            "/items?limit=10&page=2"
        );
    }

    #[test]
    fn test_append_query_param_encodes_value() {
        assert_eq!(
            append_query_param("/items", "since", "2025-01-01 00:00:00"),
            "/items?since=2025-01-01%2000%3A00%3A00"
        );
    }

    #[test]
    fn test_initialize_restored_wins() {
        let config = HttpSourceConfig::new("/api/items", PaginationKind::Cursor).with_pagination(
            PaginationConfig::new(PaginationKind::Cursor).with_initial_offset("Y"),
        );
        let manager = ScalarOffsetManager::from_config(&config);

        assert_eq!(manager.initialize(Some("X")).offset(), Some("X"));
        assert_eq!(manager.initialize(None).offset(), Some("Y"));
    }

    #[test]
    fn test_update_carries_cursor_forward() {
        let manager = cursor_manager();
        let state = manager.initialize(None);

        let page = ResponsePage::new(json!({"meta": {"next_cursor": "abc"}}));
        let next = manager.update_from_response(&state, &page);

        assert_eq!(next.offset(), Some("abc"));
        assert!(manager.has_more_pages(&next));
    }

    #[test]
    fn test_update_missing_field_ends_pagination() {
        let manager = cursor_manager();
        let state = manager.initialize(Some("abc"));

        let page = ResponsePage::new(json!({"meta": {}}));
        let next = manager.update_from_response(&state, &page);

        assert!(next.is_exhausted());
        assert!(!manager.has_more_pages(&next));
    }

    #[test]
    fn test_build_request_injects_offset_param() {
        let manager = cursor_manager();
        let state = manager.initialize(Some("abc"));
        assert_eq!(manager.build_next_request(&state), "/api/items?cursor=abc");
    }

    #[test]
    fn test_build_request_without_offset_is_base_path() {
        let manager = cursor_manager();
        let state = manager.initialize(None);
        assert_eq!(manager.build_next_request(&state), "/api/items");
    }

    #[test]
    fn test_offset_limit_reapplies_page_size() {
        let config = HttpSourceConfig::new("/api/items", PaginationKind::OffsetLimit)
            .with_pagination(
                PaginationConfig::new(PaginationKind::OffsetLimit)
                    .with_offset_pointer("/next_offset")
                    .with_page_size(50),
            );
        let manager = ScalarOffsetManager::from_config(&config);

        let empty = manager.initialize(None);
        assert_eq!(manager.build_next_request(&empty), "/api/items?limit=50");

        let resumed = manager.initialize(Some("200"));
        assert_eq!(
            manager.build_next_request(&resumed),
            "/api/items?offset=200&limit=50"
        );
    }

    #[test]
    fn test_template_offset_substitution() {
        let config = HttpSourceConfig::new("/api/items?from=${offset}", PaginationKind::Timestamp)
            .with_pagination(
                PaginationConfig::new(PaginationKind::Timestamp)
                    .with_offset_pointer("/last_modified"),
            );
        let manager = ScalarOffsetManager::from_config(&config);

        let state = manager.initialize(Some("2025-01-01T00:00:00Z"));
        assert_eq!(
            manager.build_next_request(&state),
            "/api/items?from=2025-01-01T00:00:00Z"
        );
    }

    #[test]
    fn test_update_is_idempotent() {
        let manager = cursor_manager();
        let state = manager.initialize(Some("start"));
        let page = ResponsePage::new(json!({"meta": {"next_cursor": "abc"}}));

        let first = manager.update_from_response(&state, &page);
        let second = manager.update_from_response(&state, &page);
        assert_eq!(first, second);
        assert_eq!(
            manager.build_next_request(&first),
            manager.build_next_request(&second)
        );
    }
}
