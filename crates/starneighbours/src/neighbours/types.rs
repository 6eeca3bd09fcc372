use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::platform::PlatformError;

/// Default cap on concurrent per-stargazer fetches.
///
/// Deliberately below typical upstream secondary-limit thresholds; the
/// shared budget is drained by every worker at once.
pub const DEFAULT_FANOUT_CONCURRENCY: usize = 8;

/// A repository sharing at least one stargazer with the queried one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighbour {
    /// Full name (`owner/name`) of the neighbouring repository.
    pub repo: String,
    /// The queried repository's stargazers who also starred this one.
    pub stargazers: BTreeSet<String>,
}

/// Failure of a neighbour computation.
///
/// Only the fetch of the queried repository's own stargazer list can fail
/// the computation; per-stargazer fetch failures degrade completeness
/// instead (see [`super::find_neighbours`]).
#[derive(Debug, Error)]
pub enum NeighbourError {
    #[error("failed to list stargazers for {repo}: {source}")]
    Stargazers {
        repo: String,
        #[source]
        source: PlatformError,
    },
}

impl NeighbourError {
    /// The upstream failure that aborted the computation.
    pub fn cause(&self) -> &PlatformError {
        match self {
            NeighbourError::Stargazers { source, .. } => source,
        }
    }
}

/// Tunables for a neighbour computation.
#[derive(Debug, Clone)]
pub struct ComputeOptions {
    /// Maximum concurrent per-stargazer fetches.
    pub concurrency: usize,
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_FANOUT_CONCURRENCY,
        }
    }
}
