//! GitHub API error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::platform::PlatformError;

/// Errors that can occur when talking to the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("http transport error: {0}")]
    Http(String),

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("response decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    #[error("authentication required")]
    AuthRequired,

    #[error("not found: {0}")]
    NotFound(String),
}

impl From<GitHubError> for PlatformError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Http(message) => PlatformError::Network { message },
            GitHubError::Api { status, message } => PlatformError::Api { status, message },
            GitHubError::Json(e) => PlatformError::internal(e.to_string()),
            GitHubError::RateLimited { reset_at } => PlatformError::RateLimited { reset_at },
            GitHubError::AuthRequired => PlatformError::AuthRequired,
            GitHubError::NotFound(resource) => PlatformError::not_found(resource),
        }
    }
}
