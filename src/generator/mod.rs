mod history;
mod presets;

pub use history::{History, SavedResult};
pub use presets::{
    ContentType, GenerationSettings, MAX_LENGTH_WORDS, MIN_LENGTH_WORDS, Tone,
};

use crate::{
    Result,
    job::{Poller, submit_and_poll},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Text generator: turns a prompt and settings into a saved result.
///
/// The generator owns no mutable state. Callers keep their own [`History`]
/// and pass it in, so independent generations can run concurrently against
/// separate histories (or be serialized by the caller against a shared one).
#[derive(Clone)]
pub struct TextGenerator {
    poller: Poller,
}

impl TextGenerator {
    pub fn new(poller: Poller) -> Self {
        Self { poller }
    }

    /// Runs one generation and records it at the head of `history`.
    ///
    /// Nothing is recorded when any step fails.
    pub async fn generate(
        &self,
        history: &mut History,
        prompt: &str,
        settings: GenerationSettings,
        cancel: &CancellationToken,
    ) -> Result<SavedResult> {
        let request = settings.to_request(prompt)?;
        debug!(
            "Generating {} text with {} tone",
            settings.content_type, settings.tone
        );

        let output = submit_and_poll(&self.poller, &request, cancel).await?;

        let entry = SavedResult::new(prompt.trim().to_string(), output.text(), settings);
        info!("Generated {} chars of text ({})", entry.result.len(), entry.id);

        Ok(history.record(entry).clone())
    }
}
