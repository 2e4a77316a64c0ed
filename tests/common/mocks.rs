use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use textgen_rust::{Error, GenerationRequest, Job, JobApi, JobStatus, Result};

/// One scripted answer to a status fetch.
#[derive(Debug, Clone)]
pub enum Step {
    Status(Job),
    TransportError(String),
    /// Never answers; used to exercise cancellation of an in-flight fetch.
    Hang,
}

/// Mock job service for testing. Status fetches walk through `steps`; once
/// the script runs out every fetch reports `processing`.
#[derive(Debug, Clone)]
pub struct MockJobApi {
    pub job_id: String,
    pub steps: Arc<Mutex<VecDeque<Step>>>,
    pub submissions: Arc<Mutex<Vec<GenerationRequest>>>,
    pub create_calls: Arc<AtomicUsize>,
    pub fetch_calls: Arc<AtomicUsize>,
    pub submit_error: Option<String>,
}

impl MockJobApi {
    pub fn new(job_id: &str) -> Self {
        Self {
            job_id: job_id.to_string(),
            steps: Arc::new(Mutex::new(VecDeque::new())),
            submissions: Arc::new(Mutex::new(Vec::new())),
            create_calls: Arc::new(AtomicUsize::new(0)),
            fetch_calls: Arc::new(AtomicUsize::new(0)),
            submit_error: None,
        }
    }

    pub fn with_steps(self, steps: Vec<Step>) -> Self {
        *self.steps.lock().unwrap() = steps.into();
        self
    }

    /// Script made only of status values, without output or error detail.
    pub fn with_statuses(self, statuses: &[JobStatus]) -> Self {
        let steps = statuses
            .iter()
            .map(|status| Step::Status(Job::new(self.job_id.clone(), *status)))
            .collect();
        self.with_steps(steps)
    }

    pub fn with_submit_error(mut self, error: &str) -> Self {
        self.submit_error = Some(error.to_string());
        self
    }

    pub fn create_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn get_submissions(&self) -> Vec<GenerationRequest> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobApi for MockJobApi {
    async fn create_job(&self, request: &GenerationRequest) -> Result<Job> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.submissions.lock().unwrap().push(request.clone());

        if let Some(ref error) = self.submit_error {
            return Err(Error::submission(error.clone()));
        }

        Ok(Job::new(self.job_id.clone(), JobStatus::Starting))
    }

    async fn fetch_job(&self, job_id: &str) -> Result<Job> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Status(job)) => Ok(job),
            Some(Step::TransportError(message)) => Err(Error::status_fetch(job_id, message)),
            Some(Step::Hang) => std::future::pending().await,
            None => Ok(Job::new(job_id, JobStatus::Processing)),
        }
    }
}
