use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Submission error: {0}")]
    Submission(String),

    #[error("Failed to fetch status of job {job_id}: {message}")]
    StatusFetch { job_id: String, message: String },

    #[error("Generation failed for job {job_id}: {detail}")]
    GenerationFailed { job_id: String, detail: String },

    #[error("Job {job_id}: operation exceeded the allowed wait time ({attempts} attempts)")]
    Timeout { job_id: String, attempts: u32 },

    #[error("Polling of job {job_id} was cancelled")]
    Cancelled { job_id: String },

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    pub fn status_fetch(job_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StatusFetch {
            job_id: job_id.into(),
            message: message.into(),
        }
    }

    pub fn generation_failed(job_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::GenerationFailed {
            job_id: job_id.into(),
            detail: detail.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for failures detected locally, before anything reached the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
