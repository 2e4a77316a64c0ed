use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use textgen_rust::{
    PollConfig, Poller, Result,
    config::{ClientConfig, Config, PollSettings, UpstreamConfig},
};
use tokio::fs;

use super::MockJobApi;

/// Poll cadence fast enough for tests while keeping the default attempt budget.
pub fn fast_poll_config() -> PollConfig {
    PollConfig {
        max_attempts: 20,
        interval: Duration::from_millis(1),
    }
}

pub fn create_test_poller(api: &MockJobApi) -> Poller {
    Poller::new(Arc::new(api.clone()), fast_poll_config())
}

/// Client configuration pointing at a mock relay.
pub fn create_client_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        poll: PollSettings {
            max_attempts: 20,
            interval_ms: 1,
            request_timeout_secs: 5,
        },
    }
}

/// Upstream configuration pointing at a mock prediction service.
pub fn create_upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        api_token: Some("test-token".to_string()),
        model_version: "test-version".to_string(),
    }
}

pub fn create_test_config() -> Config {
    Config::default()
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

pub fn body_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("response body is not JSON")
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 3001
  logs:
    level: "debug"
upstream:
  base_url: "https://api.replicate.com/v1"
  api_token: "r8_from_file"
client:
  base_url: "http://localhost:3001"
  poll:
    max_attempts: 10
    interval_ms: 500
"#;
