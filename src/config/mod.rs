mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub async fn load() -> Result<Config> {
    load_from(&config_path(env::var("CONFIG_PATH").ok())).await
}

/// `CONFIG_PATH` when set, `config.yaml` otherwise.
pub fn config_path(from_env: Option<String>) -> String {
    from_env.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    load_from_with(config_path, env::var("REPLICATE_API_TOKEN").ok()).await
}

/// Loads `config_path`, letting `token_override` replace `upstream.api_token`.
pub async fn load_from_with(config_path: &str, token_override: Option<String>) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let mut config: Config = serde_yaml::from_str(&config_str)?;

    if let Some(token) = token_override {
        debug!("Using upstream token from REPLICATE_API_TOKEN");
        config.upstream.api_token = Some(token);
    }

    config.validate()?;
    Ok(config)
}
