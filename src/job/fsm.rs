use crate::{Error, Result};
use tracing::{debug, info, warn};

// Poller states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Waiting on the status fetch numbered `n` (0-based).
    Polling(u32),
    Succeeded,
    Failed,
    TimedOut,
    Cancelled,
}

// Poller events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvent {
    JobSucceeded,
    JobFailed,
    StillRunning,
    TransportError,
    CancelRequested,
}

pub struct PollStateMachine {
    state: PollState,
    max_attempts: u32,
}

impl PollStateMachine {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            state: PollState::Polling(0),
            max_attempts,
        }
    }

    pub fn current_state(&self) -> PollState {
        self.state
    }

    /// Attempt number while polling, `None` once terminal.
    pub fn attempt(&self) -> Option<u32> {
        match self.state {
            PollState::Polling(n) => Some(n),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: PollEvent) -> Result<PollState> {
        let old_state = self.state;

        let new_state = match (old_state, event) {
            (PollState::Polling(_), PollEvent::JobSucceeded) => PollState::Succeeded,
            (PollState::Polling(_), PollEvent::JobFailed) => PollState::Failed,
            (PollState::Polling(_), PollEvent::TransportError) => PollState::Failed,
            (PollState::Polling(_), PollEvent::CancelRequested) => PollState::Cancelled,
            (PollState::Polling(n), PollEvent::StillRunning) if n + 1 < self.max_attempts => {
                PollState::Polling(n + 1)
            }
            (PollState::Polling(_), PollEvent::StillRunning) => PollState::TimedOut,
            _ => {
                warn!(
                    "Invalid poll transition from {:?} with event {:?}",
                    old_state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", old_state),
                    requested: format!("{:?}", event),
                });
            }
        };

        if is_terminal_state(new_state) {
            info!(
                "Poll state transition: {:?} -> {:?} (event: {:?})",
                old_state, new_state, event
            );
        } else {
            debug!("Poll state transition: {:?} -> {:?}", old_state, new_state);
        }

        self.state = new_state;
        Ok(new_state)
    }

    pub fn is_terminal(&self) -> bool {
        is_terminal_state(self.state)
    }
}

fn is_terminal_state(state: PollState) -> bool {
    !matches!(state, PollState::Polling(_))
}
