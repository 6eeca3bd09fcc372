//! Configuration for the starneighbours service.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. Environment variables (prefixed with `STARNEIGHBOURS_`, e.g.,
//!    `STARNEIGHBOURS_GITHUB_TOKEN`)
//! 2. Config file (./starneighbours.toml, then
//!    ~/.config/starneighbours/config.toml)
//! 3. Built-in defaults
//!
//! The bare `GITHUB_TOKEN` environment variable is also honored as a
//! fallback for the upstream credential.
//!
//! Example config file:
//! ```toml
//! [server]
//! bind_addr = "127.0.0.1:8000"
//!
//! [github]
//! token = "ghp_..."  # or use STARNEIGHBOURS_GITHUB_TOKEN / GITHUB_TOKEN
//!
//! [fetch]
//! page_size = 100
//! concurrency = 8
//! requests_per_second = 10
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// Upstream fetch tuning.
    pub fetch: FetchConfig,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the listener to.
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
        }
    }
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    /// Can also be set via the STARNEIGHBOURS_GITHUB_TOKEN or GITHUB_TOKEN
    /// environment variables.
    pub token: Option<String>,
}

/// Upstream fetch tuning.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Items per page for paginated upstream calls.
    pub page_size: u32,
    /// Maximum concurrent per-stargazer fetches per request.
    pub concurrency: usize,
    /// Proactive pacing of outgoing API calls.
    pub requests_per_second: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            concurrency: 8,
            requests_per_second: 10,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/starneighbours/config.toml)
    /// 3. Local config file (./starneighbours.toml)
    /// 4. Environment variables with STARNEIGHBOURS_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "starneighbours") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        let local_config = PathBuf::from("starneighbours.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./starneighbours.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("STARNEIGHBOURS")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the GitHub token, falling back to the plain GITHUB_TOKEN variable.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }

    /// Get the default config file path.
    #[allow(dead_code)]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "starneighbours")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
