use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Replicate model version the relay pins every prediction to.
pub const DEFAULT_MODEL_VERSION: &str =
    "2c1608e18606fad2812020dc541930f2d0495ce32eee50074220b87300bc16e1";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Where the relay forwards predictions to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_model_version")]
    pub model_version: String,
}

/// How the job client reaches the relay and how long it waits on a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_relay_url")]
    pub base_url: String,
    #[serde(default)]
    pub poll: PollSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.client.poll.max_attempts == 0 {
            return Err(Error::config("client.poll.max_attempts must be at least 1"));
        }
        if self.client.poll.request_timeout_secs == 0 {
            return Err(Error::config(
                "client.poll.request_timeout_secs must be at least 1",
            ));
        }
        if self.upstream.base_url.trim().is_empty() {
            return Err(Error::config("upstream.base_url must not be empty"));
        }
        Ok(())
    }
}

impl UpstreamConfig {
    /// Token used for the `Authorization` header, failing when none is configured.
    pub fn require_token(&self) -> Result<&str> {
        self.api_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                Error::config("upstream.api_token is not set (nor REPLICATE_API_TOKEN)")
            })
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_url(),
            api_token: None,
            model_version: default_model_version(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_relay_url(),
            poll: PollSettings::default(),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_ms: default_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_upstream_url() -> String {
    "https://api.replicate.com/v1".to_string()
}

fn default_model_version() -> String {
    DEFAULT_MODEL_VERSION.to_string()
}

fn default_relay_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_max_attempts() -> u32 {
    20
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}
