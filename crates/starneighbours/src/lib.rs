//! Starneighbours - stargazer-overlap discovery for GitHub repositories.
//!
//! Given a repository, this library fetches its stargazers, fans out to each
//! stargazer's own starred repositories, and derives the set of "neighbour"
//! repositories: those sharing at least one stargazer with the queried one,
//! together with the exact set of shared stargazers.
//!
//! The upstream API is reached through the [`platform::StarGraphClient`]
//! capability trait, with [`github::GitHubClient`] as the concrete adapter.
//! Pagination, rate-limit accounting and error normalization live in the
//! adapter; the aggregation algorithm in [`neighbours`] is upstream-agnostic.
//!
//! # Example
//!
//! ```ignore
//! use starneighbours::{GitHubClient, find_neighbours, ComputeOptions};
//!
//! let client = GitHubClient::new(&token, None)?;
//! let neighbours = find_neighbours(&client, "rust-lang", "rust", &ComputeOptions::default()).await?;
//! for n in neighbours {
//!     println!("{} shares {} stargazers", n.repo, n.stargazers.len());
//! }
//! ```

pub mod github;
pub mod http;
pub mod neighbours;
pub mod platform;
pub mod retry;

pub use github::GitHubClient;
pub use neighbours::{ComputeOptions, Neighbour, NeighbourError, find_neighbours};
pub use platform::{PlatformError, RateLimitGuard, RateLimitInfo, StarGraphClient};
