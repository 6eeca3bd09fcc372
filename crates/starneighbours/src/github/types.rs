//! GitHub API wire types.
//!
//! Only the fields this crate actually reads are modeled; the rest of each
//! upstream payload is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::platform::RateLimitInfo;

/// A user entry from `GET /repos/{owner}/{repo}/stargazers`.
#[derive(Debug, Clone, Deserialize)]
pub struct Stargazer {
    /// The user's login.
    pub login: String,
}

/// A repository entry from `GET /users/{user}/starred`.
#[derive(Debug, Clone, Deserialize)]
pub struct StarredRepo {
    /// Full name in `owner/name` form.
    pub full_name: String,
}

/// A single rate limit resource entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitResource {
    /// Maximum requests allowed per period.
    pub limit: usize,
    /// Remaining requests in the current period.
    pub remaining: usize,
    /// Unix timestamp when the rate limit resets.
    pub reset: i64,
}

impl RateLimitResource {
    /// Convert to the shared rate-limit representation.
    #[must_use]
    pub fn to_info(&self) -> RateLimitInfo {
        RateLimitInfo {
            limit: self.limit,
            remaining: self.remaining,
            reset_at: DateTime::from_timestamp(self.reset, 0).unwrap_or_else(Utc::now),
        }
    }
}

/// Rate limit resources from GitHub's `/rate_limit` endpoint.
///
/// Only the core resource matters here; the stargazer endpoints all draw on
/// the core budget.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitResources {
    pub core: RateLimitResource,
}

/// Full response of `GET /rate_limit`.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitResponse {
    pub resources: RateLimitResources,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_response_parses_core_resource() {
        let body = r#"{
            "resources": {
                "core": { "limit": 5000, "used": 1, "remaining": 4999, "reset": 1700000000 },
                "search": { "limit": 30, "used": 0, "remaining": 30, "reset": 1700000000 }
            },
            "rate": { "limit": 5000, "used": 1, "remaining": 4999, "reset": 1700000000 }
        }"#;

        let parsed: RateLimitResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.resources.core.remaining, 4999);

        let info = parsed.resources.core.to_info();
        assert_eq!(info.limit, 5000);
        assert_eq!(info.reset_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn stargazer_entry_ignores_unknown_fields() {
        let body = r#"{ "login": "octocat", "id": 1, "site_admin": false }"#;
        let user: Stargazer = serde_json::from_str(body).unwrap();
        assert_eq!(user.login, "octocat");
    }
}
