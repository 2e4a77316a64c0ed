mod client;
pub mod fsm;
mod poller;
mod types;

pub use client::{HttpJobApi, JobApi, submit};
pub use fsm::{PollEvent, PollState, PollStateMachine};
pub use poller::{PollConfig, Poller};
pub use types::{GenerationRequest, Job, JobOutput, JobStatus};

use crate::Result;
use tokio_util::sync::CancellationToken;

/// Submits `request` through the poller's transport and waits for its output.
pub async fn submit_and_poll(
    poller: &Poller,
    request: &GenerationRequest,
    cancel: &CancellationToken,
) -> Result<JobOutput> {
    let job = submit(poller.api().as_ref(), request).await?;
    poller.poll_with_cancel(&job.id, cancel).await
}
