//! HTTP handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;

use starneighbours::neighbours::{Neighbour, find_neighbours};
use starneighbours::platform::PlatformError;

use crate::state::AppState;

/// GET / - service banner.
pub async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "service": "starneighbours",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /v1/repos/{user}/{repo}/starneighbours
///
/// An empty neighbour set is reported as 404, so clients can tell "this
/// repository has no neighbours" apart from a non-empty listing; upstream
/// failures map to their own statuses via [`status_for`].
pub async fn star_neighbours(
    State(state): State<AppState>,
    Path((user, repo)): Path<(String, String)>,
) -> Result<Json<Vec<Neighbour>>, (StatusCode, String)> {
    let neighbours = find_neighbours(state.client.as_ref(), &user, &repo, &state.compute)
        .await
        .map_err(|err| {
            let status = status_for(err.cause());
            if status.is_server_error() {
                tracing::error!(%user, %repo, error = %err, "neighbour computation failed");
            } else {
                tracing::debug!(%user, %repo, error = %err, "neighbour computation rejected");
            }
            (status, err.to_string())
        })?;

    if neighbours.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            format!("no neighbours found for {user}/{repo}"),
        ));
    }

    Ok(Json(neighbours))
}

/// GET /v1/limits - upstream rate limit status.
pub async fn limits(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let info = state
        .client
        .rate_limit()
        .await
        .map_err(|err| (status_for(&err), err.to_string()))?;

    Ok(Json(json!({
        "limit": info.limit,
        "remaining": info.remaining,
        "reset_at": info.reset_at.to_rfc3339(),
    })))
}

/// Map upstream failures to response statuses.
fn status_for(err: &PlatformError) -> StatusCode {
    match err {
        PlatformError::NotFound { .. } => StatusCode::NOT_FOUND,
        PlatformError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        PlatformError::AuthRequired
        | PlatformError::Api { .. }
        | PlatformError::Network { .. }
        | PlatformError::Internal { .. } => StatusCode::BAD_GATEWAY,
    }
}
