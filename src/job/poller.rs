use super::{
    client::JobApi,
    fsm::{PollEvent, PollState, PollStateMachine},
    types::{JobOutput, JobStatus},
};
use crate::{Error, Result, config::PollSettings};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Polling cadence. Fixed interval, no backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            interval: Duration::from_secs(1),
        }
    }
}

impl From<&PollSettings> for PollConfig {
    fn from(settings: &PollSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts,
            interval: settings.interval(),
        }
    }
}

/// Waits for a job to reach a terminal state.
///
/// Every status fetch is one attempt. `succeeded` and `failed` end the loop
/// immediately; anything else sleeps `interval` and tries again until
/// `max_attempts` fetches have been made. A failed fetch is not retried: it
/// aborts the whole poll with [`Error::StatusFetch`].
///
/// A `Poller` holds no per-job state, so one instance can drive any number of
/// concurrent polls.
#[derive(Clone)]
pub struct Poller {
    api: Arc<dyn JobApi>,
    config: PollConfig,
}

impl Poller {
    pub fn new(api: Arc<dyn JobApi>, config: PollConfig) -> Self {
        let config = PollConfig {
            max_attempts: config.max_attempts.max(1),
            ..config
        };
        Self { api, config }
    }

    pub fn api(&self) -> &Arc<dyn JobApi> {
        &self.api
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub async fn poll(&self, job_id: &str) -> Result<JobOutput> {
        self.poll_with_cancel(job_id, &CancellationToken::new()).await
    }

    /// Like [`Poller::poll`], but gives up with [`Error::Cancelled`] as soon as
    /// `cancel` fires, including mid-fetch and mid-sleep.
    pub async fn poll_with_cancel(
        &self,
        job_id: &str,
        cancel: &CancellationToken,
    ) -> Result<JobOutput> {
        let mut fsm = PollStateMachine::new(self.config.max_attempts);

        while let Some(attempt) = fsm.attempt() {
            if cancel.is_cancelled() {
                return cancelled(&mut fsm, job_id);
            }

            debug!(
                "Polling job {} (attempt {}/{})",
                job_id,
                attempt + 1,
                self.config.max_attempts
            );

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = self.api.fetch_job(job_id) => Some(result),
            };

            let job = match fetched {
                None => return cancelled(&mut fsm, job_id),
                Some(Ok(job)) => job,
                Some(Err(e)) => {
                    fsm.transition(PollEvent::TransportError)?;
                    warn!(
                        "Status fetch for job {} failed on attempt {}: {}",
                        job_id,
                        attempt + 1,
                        e
                    );
                    return Err(match e {
                        Error::StatusFetch { .. } => e,
                        other => Error::status_fetch(job_id, other.to_string()),
                    });
                }
            };

            match job.status {
                JobStatus::Succeeded => {
                    fsm.transition(PollEvent::JobSucceeded)?;
                    info!("Job {} succeeded after {} attempt(s)", job_id, attempt + 1);
                    return Ok(JobOutput(job.output.unwrap_or(Value::Null)));
                }
                JobStatus::Failed => {
                    fsm.transition(PollEvent::JobFailed)?;
                    let detail = job.error_detail();
                    warn!("Job {} failed: {}", job_id, detail);
                    return Err(Error::generation_failed(job_id, detail));
                }
                status => {
                    debug!("Job {} is {:?}", job_id, status);
                    if fsm.transition(PollEvent::StillRunning)? == PollState::TimedOut {
                        break;
                    }
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return cancelled(&mut fsm, job_id),
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }

        warn!(
            "Job {} still running after {} attempts",
            job_id, self.config.max_attempts
        );
        Err(Error::Timeout {
            job_id: job_id.to_string(),
            attempts: self.config.max_attempts,
        })
    }
}

fn cancelled<T>(fsm: &mut PollStateMachine, job_id: &str) -> Result<T> {
    fsm.transition(PollEvent::CancelRequested)?;
    info!("Stopped polling job {}: cancelled", job_id);
    Err(Error::Cancelled {
        job_id: job_id.to_string(),
    })
}
