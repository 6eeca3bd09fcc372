use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::Result;

/// Rate limit status reported by the upstream API.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Maximum requests allowed per period.
    pub limit: usize,
    /// Remaining requests in the current period.
    pub remaining: usize,
    /// When the budget resets.
    pub reset_at: DateTime<Utc>,
}

/// Capability interface over the upstream star-graph API.
///
/// One concrete adapter exists per upstream
/// ([`crate::github::GitHubClient`]); the aggregation engine depends only on
/// this trait, so tests substitute a scripted client.
///
/// # Implementation Notes
///
/// Implementors should:
/// - Walk pagination internally for the list operations, presenting one
///   continuous, fully materialized sequence
/// - Consult the shared rate-limit budget before each page request and fail
///   fast instead of issuing a request destined for rejection
/// - Convert upstream-specific failures into [`super::PlatformError`]
#[async_trait]
pub trait StarGraphClient: Send + Sync {
    /// List the logins of every user who starred `owner/repo`.
    ///
    /// A repository that does not exist upstream fails with `NotFound`.
    async fn fetch_stargazers(&self, owner: &str, repo: &str) -> Result<Vec<String>>;

    /// List the full names (`owner/name`) of every repository `user` has starred.
    async fn fetch_starred_repos(&self, user: &str) -> Result<Vec<String>>;

    /// Probe the upstream once, verifying the credential and that budget
    /// remains. Meant for process start, not the request path.
    async fn check_connectivity(&self) -> Result<RateLimitInfo>;

    /// Current rate-limit status.
    async fn rate_limit(&self) -> Result<RateLimitInfo>;
}
