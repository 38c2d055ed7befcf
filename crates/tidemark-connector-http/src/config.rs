//! HTTP source configuration
//!
//! Static, validated configuration for one polled HTTP API source: where the
//! base request lives, how the API paginates, and which response fields carry
//! continuation values.

use serde::{Deserialize, Serialize};
use tidemark_connector::config::IntervalConfig;
use tidemark_connector::error::{SourceError, SourceResult};
use tidemark_connector::types::{PaginationKind, TokenExtractionMode};

/// Configuration for one polled HTTP API source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSourceConfig {
    /// Base path template for the poll request, relative to the caller's
    /// host (e.g. `/api/accounts?$select=name`). May contain `${offset}`.
    pub base_path: String,

    /// Pagination configuration.
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Polling cadence configuration.
    #[serde(default)]
    pub intervals: IntervalConfig,
}

impl HttpSourceConfig {
    /// Create a config with required fields and defaults everywhere else.
    pub fn new(base_path: impl Into<String>, kind: PaginationKind) -> Self {
        Self {
            base_path: base_path.into(),
            pagination: PaginationConfig {
                kind,
                ..PaginationConfig::default()
            },
            intervals: IntervalConfig::default(),
        }
    }

    /// Set the pagination configuration.
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Set the interval configuration.
    pub fn with_intervals(mut self, intervals: IntervalConfig) -> Self {
        self.intervals = intervals;
        self
    }

    /// Validate the configuration.
    ///
    /// Called once at source construction; an error here is fatal before any
    /// polling starts.
    pub fn validate(&self) -> SourceResult<()> {
        if self.base_path.is_empty() {
            return Err(SourceError::invalid_configuration(
                "base_path is required",
            ));
        }
        self.pagination.validate()?;
        self.intervals.validate()?;
        Ok(())
    }
}

/// How the source API paginates and where continuation values live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Pagination protocol. Immutable for the life of the source.
    #[serde(default = "default_kind")]
    pub kind: PaginationKind,

    /// Statically configured initial offset, used when no restored offset
    /// exists. Empty means "start from the bare base path".
    #[serde(default)]
    pub initial_offset: String,

    /// JSON pointer to the continuation field in the response body
    /// (simple incrementing, offset/limit, cursor and timestamp kinds).
    #[serde(default = "default_offset_pointer")]
    pub offset_pointer: String,

    /// Query parameter the offset is re-injected into.
    #[serde(default = "default_offset_param")]
    pub offset_param: String,

    /// Query parameter for the page size (offset/limit kind).
    #[serde(default = "default_size_param")]
    pub size_param: String,

    /// Page size, re-applied on every offset/limit request since the limit
    /// is not carried in state.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum allowed page size.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// JSON pointer to the `OData` next link field.
    #[serde(default = "default_next_link_pointer")]
    pub next_link_pointer: String,

    /// JSON pointer to the `OData` delta link field.
    #[serde(default = "default_delta_link_pointer")]
    pub delta_link_pointer: String,

    /// How `OData` continuation URLs are reduced to durable offsets.
    #[serde(default)]
    pub token_mode: TokenExtractionMode,

    /// Skip-token query parameter name (`OData`, token-only mode).
    #[serde(default = "default_skip_token_param")]
    pub skip_token_param: String,

    /// Delta-token query parameter name (`OData`, token-only mode).
    #[serde(default = "default_delta_token_param")]
    pub delta_token_param: String,
}

fn default_kind() -> PaginationKind {
    PaginationKind::SimpleIncrementing
}

fn default_offset_pointer() -> String {
    "/offset".to_string()
}

fn default_offset_param() -> String {
    "offset".to_string()
}

fn default_size_param() -> String {
    "limit".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_max_page_size() -> u32 {
    1000
}

fn default_next_link_pointer() -> String {
    "/@odata.nextLink".to_string()
}

fn default_delta_link_pointer() -> String {
    "/@odata.deltaLink".to_string()
}

fn default_skip_token_param() -> String {
    "$skiptoken".to_string()
}

fn default_delta_token_param() -> String {
    "$deltatoken".to_string()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            initial_offset: String::new(),
            offset_pointer: default_offset_pointer(),
            offset_param: default_offset_param(),
            size_param: default_size_param(),
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            next_link_pointer: default_next_link_pointer(),
            delta_link_pointer: default_delta_link_pointer(),
            token_mode: TokenExtractionMode::default(),
            skip_token_param: default_skip_token_param(),
            delta_token_param: default_delta_token_param(),
        }
    }
}

impl PaginationConfig {
    /// Create a pagination config for the given kind with default values.
    pub fn new(kind: PaginationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Set the initial offset.
    pub fn with_initial_offset(mut self, offset: impl Into<String>) -> Self {
        self.initial_offset = offset.into();
        self
    }

    /// Set the continuation field JSON pointer.
    pub fn with_offset_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.offset_pointer = pointer.into();
        self
    }

    /// Set the offset query parameter name.
    pub fn with_offset_param(mut self, param: impl Into<String>) -> Self {
        self.offset_param = param.into();
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Set the token extraction mode.
    pub fn with_token_mode(mut self, mode: TokenExtractionMode) -> Self {
        self.token_mode = mode;
        self
    }

    /// Set the skip-token parameter name.
    pub fn with_skip_token_param(mut self, param: impl Into<String>) -> Self {
        self.skip_token_param = param.into();
        self
    }

    /// Set the delta-token parameter name.
    pub fn with_delta_token_param(mut self, param: impl Into<String>) -> Self {
        self.delta_token_param = param.into();
        self
    }

    /// The configured initial offset, if non-empty.
    pub fn initial_offset(&self) -> Option<&str> {
        if self.initial_offset.is_empty() {
            None
        } else {
            Some(&self.initial_offset)
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SourceResult<()> {
        if self.page_size == 0 {
            return Err(SourceError::invalid_configuration(
                "page_size must be greater than zero",
            ));
        }
        if self.page_size > self.max_page_size {
            return Err(SourceError::invalid_configuration(format!(
                "page_size {} exceeds max_page_size {}",
                self.page_size, self.max_page_size
            )));
        }

        match self.kind {
            PaginationKind::SimpleIncrementing
            | PaginationKind::OffsetLimit
            | PaginationKind::Cursor
            | PaginationKind::Timestamp => {
                if !self.offset_pointer.starts_with('/') {
                    return Err(SourceError::invalid_configuration(format!(
                        "offset_pointer '{}' is not a JSON pointer",
                        self.offset_pointer
                    )));
                }
                if self.offset_param.is_empty() {
                    return Err(SourceError::invalid_configuration(
                        "offset_param is required",
                    ));
                }
            }
            PaginationKind::LinkHeader => {}
            PaginationKind::OData => {
                for (name, pointer) in [
                    ("next_link_pointer", &self.next_link_pointer),
                    ("delta_link_pointer", &self.delta_link_pointer),
                ] {
                    if !pointer.starts_with('/') {
                        return Err(SourceError::invalid_configuration(format!(
                            "{name} '{pointer}' is not a JSON pointer"
                        )));
                    }
                }
                if self.skip_token_param.is_empty() || self.delta_token_param.is_empty() {
                    return Err(SourceError::invalid_configuration(
                        "skip_token_param and delta_token_param are required",
                    ));
                }
            }
        }

        Ok(())
    }
}
