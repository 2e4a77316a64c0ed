pub mod config;
pub mod error;
pub mod generator;
pub mod job;
pub mod server;

pub use error::{Error, Result};
pub use generator::{GenerationSettings, History, TextGenerator};
pub use job::{GenerationRequest, Job, JobApi, JobOutput, JobStatus, PollConfig, Poller};
