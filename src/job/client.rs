use super::types::*;
use crate::{Error, Result, config::ClientConfig};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Transport used by the submission client and the poller.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Creates a job on the remote service. Exactly one network call.
    async fn create_job(&self, request: &GenerationRequest) -> Result<Job>;

    /// Fetches the current projection of a job.
    async fn fetch_job(&self, job_id: &str) -> Result<Job>;
}

/// Validates `request` and submits it, returning the freshly created job.
///
/// Blank prompts and out-of-range parameters fail with [`Error::Validation`]
/// before `api` is touched.
pub async fn submit(api: &dyn JobApi, request: &GenerationRequest) -> Result<Job> {
    request.validate()?;

    debug!(
        "Submitting generation request ({} chars, temperature {}, max_tokens {})",
        request.prompt.len(),
        request.temperature,
        request.max_tokens
    );

    let job = api.create_job(request).await?;
    info!("Created job {} with status {:?}", job.id, job.status);
    Ok(job)
}

/// [`JobApi`] over the relay's HTTP endpoints.
pub struct HttpJobApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpJobApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.poll.request_timeout())
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn jobs_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    fn job_url(&self, job_id: &str) -> String {
        format!("{}/api/generate/{}", self.base_url, job_id)
    }
}

/// Best-effort message from an error response: the relay's `{error}` field,
/// falling back to the raw body and then the status line.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(json) = serde_json::from_str::<Value>(&body) {
        if let Some(message) = json.get("error").and_then(Value::as_str) {
            return message.to_string();
        }
    }

    if body.trim().is_empty() {
        status_line(status)
    } else {
        format!("{}: {}", status_line(status), body.trim())
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

#[async_trait]
impl JobApi for HttpJobApi {
    async fn create_job(&self, request: &GenerationRequest) -> Result<Job> {
        let url = self.jobs_url();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::submission(format!("Failed to reach {}: {}", url, e)))?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            warn!("Job submission rejected: {}", message);
            return Err(Error::submission(message));
        }

        response
            .json::<Job>()
            .await
            .map_err(|e| Error::submission(format!("Invalid submission response: {}", e)))
    }

    async fn fetch_job(&self, job_id: &str) -> Result<Job> {
        let url = self.job_url(job_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::status_fetch(job_id, e.to_string()))?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            return Err(Error::status_fetch(job_id, message));
        }

        response
            .json::<Job>()
            .await
            .map_err(|e| Error::status_fetch(job_id, format!("Invalid status response: {}", e)))
    }
}
