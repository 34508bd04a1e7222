use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_ENDPOINT_URL: &str = "https://dbc-32cf6ae7-cf82.staging.cloud.databricks.com/serving-endpoints/databricks-gpt-oss-120b/invocations";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to handlers through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the inference endpoint. `None` when unset or empty;
    /// generation requests then fail with a configuration error.
    pub databricks_api_token: Option<String>,
    pub databricks_endpoint_url: String,
    pub inference_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub environment: String,
    /// Explicit frontend directory; tried before the built-in candidates.
    pub public_dir: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to
    /// mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let databricks_api_token = lookup("DATABRICKS_API_TOKEN").filter(|t| !t.trim().is_empty());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => 8000,
        };

        let timeout_secs = match lookup("INFERENCE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("INFERENCE_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            databricks_api_token,
            databricks_endpoint_url: lookup("DATABRICKS_ENDPOINT_URL")
                .unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string()),
            inference_timeout: Duration::from_secs(timeout_secs),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            public_dir: lookup("PUBLIC_DIR").map(PathBuf::from),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn token_configured(&self) -> bool {
        self.databricks_api_token.is_some()
    }
}
