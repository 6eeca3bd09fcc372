//! Starneighbours service binary.

use tracing_subscriber::EnvFilter;

use starneighbours::GitHubClient;
use starneighbours::platform::{ApiRateLimiter, StarGraphClient};

use starneighbours_server::config::Config;
use starneighbours_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("starneighbours=info,starneighbours_server=info")
        }))
        .init();

    let config = Config::load();

    let token = config.github_token().unwrap_or_else(|| {
        tracing::error!("no GitHub token configured, upstream calls will be rejected");
        String::new()
    });

    let pacer = ApiRateLimiter::new(config.fetch.requests_per_second);
    let client = GitHubClient::new(&token, Some(pacer))?.with_page_size(config.fetch.page_size);

    // One-shot connectivity probe. A failure is loud but not fatal: the
    // service starts degraded and surfaces upstream errors per request.
    match client.check_connectivity().await {
        Ok(info) => {
            tracing::info!(
                remaining = info.remaining,
                limit = info.limit,
                "GitHub connection successful"
            );
        }
        Err(err) => {
            tracing::error!(error = %err, "GitHub connectivity check failed");
        }
    }

    let state = AppState::new(client, &config);
    let app = starneighbours_server::app(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    tracing::info!("listening on {}", config.server.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
