use std::sync::Arc;

use starneighbours::neighbours::ComputeOptions;
use starneighbours::platform::StarGraphClient;

use crate::config::Config;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// The upstream star-graph client.
    pub client: Arc<dyn StarGraphClient>,
    /// Per-request computation tuning.
    pub compute: ComputeOptions,
}

impl AppState {
    pub fn new(client: impl StarGraphClient + 'static, config: &Config) -> Self {
        Self {
            client: Arc::new(client),
            compute: ComputeOptions {
                concurrency: config.fetch.concurrency,
            },
        }
    }
}
