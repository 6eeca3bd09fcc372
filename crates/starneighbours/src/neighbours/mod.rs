//! Neighbour discovery: which repositories share stargazers with a given one.
//!
//! # Module Structure
//!
//! - [`types`] - `Neighbour`, `ComputeOptions`, `NeighbourError`
//! - [`engine`] - the fan-out/aggregate algorithm

mod engine;
mod types;

pub use engine::find_neighbours;
pub use types::{ComputeOptions, DEFAULT_FANOUT_CONCURRENCY, Neighbour, NeighbourError};
