//! GitHub adapter for the star-graph client interface.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Wire data structures
//! - [`client`] - The client and its pagination walk
//! - [`pagination`] - `Link` header parsing

mod client;
mod error;
mod pagination;
mod types;

pub use client::{DEFAULT_PAGE_SIZE, GITHUB_API_BASE, GitHubClient};
pub use error::GitHubError;
pub use pagination::{LinkPagination, parse_link_header};
pub use types::{RateLimitResource, RateLimitResponse, Stargazer, StarredRepo};
