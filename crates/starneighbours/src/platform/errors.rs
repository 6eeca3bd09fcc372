use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur when talking to the upstream star-graph API.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Unexpected API response status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Shared request budget exhausted.
    #[error("rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    /// Credential missing, invalid or insufficient.
    #[error("authentication required")]
    AuthRequired,

    /// Resource (repository, user) does not exist upstream.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Network-level failure reaching the upstream.
    #[error("network error: {message}")]
    Network { message: String },

    /// Unexpected/internal error.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl PlatformError {
    /// Create an API error.
    #[inline]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a not found error.
    #[inline]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a network error.
    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error is a rate limit error.
    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Check if this error means the resource is missing upstream.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for upstream operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
