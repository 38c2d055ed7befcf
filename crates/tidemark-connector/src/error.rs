//! Connector framework error types
//!
//! Error definitions with transient/permanent classification. Everything on
//! the polling hot path is infallible by design: a missing continuation field
//! is end-of-pagination, not an error. Errors here cover construction-time
//! configuration problems and the persistence boundary.

use thiserror::Error;

/// Error that can occur in the source connector framework.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Source configuration is invalid. Raised at construction time, before
    /// any polling starts.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Configured pagination kind is not supported by this engine.
    #[error("unsupported pagination kind: {kind}")]
    UnsupportedPaginationKind { kind: String },

    /// Offset store operation failed.
    #[error("offset store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization error.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// Internal error.
    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SourceError {
    /// Check if this error is transient and the operation should be retried.
    ///
    /// Only the persistence boundary can fail transiently; configuration
    /// errors require human intervention.
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceError::Store { .. })
    }

    /// Check if this error is permanent and retry won't help.
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }

    /// Get an error code for classification.
    pub fn error_code(&self) -> &'static str {
        match self {
            SourceError::InvalidConfiguration { .. } => "INVALID_CONFIG",
            SourceError::UnsupportedPaginationKind { .. } => "UNSUPPORTED_PAGINATION_KIND",
            SourceError::Store { .. } => "STORE_ERROR",
            SourceError::Serialization { .. } => "SERIALIZATION_ERROR",
            SourceError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    // Convenience constructors

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        SourceError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        SourceError::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with source.
    pub fn store_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SourceError::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        SourceError::Internal {
            message: message.into(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result type for source connector operations.
pub type SourceResult<T> = Result<T, SourceError>;
