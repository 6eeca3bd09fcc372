//! HTTP service exposing stargazer-neighbour discovery.
//!
//! The binary in `main.rs` wires configuration, logging and the GitHub
//! client together; everything testable lives here.

pub mod config;
pub mod routes;
pub mod state;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Build the service router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route(
            "/v1/repos/{user}/{repo}/starneighbours",
            get(routes::star_neighbours),
        )
        .route("/v1/limits", get(routes::limits))
        .with_state(state)
}
