//! Summary and time-estimate services with fixed fallbacks.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{
    assistant::{
        ports::{TextGenerationError, TextGenerator},
        prompts::{estimate_prompt, summary_prompt},
    },
    session::{SessionRegistry, SessionTicket},
    task::domain::TaskId,
};

/// Shown when the service replies without text.
pub const SUMMARY_EMPTY_FALLBACK: &str = "No summary available.";

/// Shown when the service call fails.
pub const SUMMARY_FAILURE_FALLBACK: &str = "Could not generate a summary.";

/// Shown when no API key is configured.
pub const SUMMARY_MISSING_CREDENTIAL: &str =
    "Summary unavailable: the AI service API key is not configured.";

/// Estimate used when the service gives no usable number.
pub const DEFAULT_ESTIMATE_MINUTES: u32 = 60;

/// Returns the first run of ASCII digits in `text` as an integer.
#[must_use]
pub fn first_integer(text: &str) -> Option<u32> {
    let start = text.find(|ch: char| ch.is_ascii_digit())?;
    let rest = text.get(start..)?;
    let end = rest
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(rest.len());
    rest.get(..end)?.parse().ok()
}

/// Wraps a [`TextGenerator`] so callers always get a displayable value.
pub struct TaskAssistant<G>
where
    G: TextGenerator + ?Sized,
{
    generator: Arc<G>,
}

impl<G> Clone for TaskAssistant<G>
where
    G: TextGenerator + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<G> TaskAssistant<G>
where
    G: TextGenerator + ?Sized,
{
    /// Creates an assistant over `generator`.
    #[must_use]
    pub const fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    /// Summarizes a task description for the technician.
    ///
    /// Never fails: problems are logged and replaced by a fixed message.
    pub async fn summarize(&self, description: &str) -> String {
        let prompt = match summary_prompt(description) {
            Ok(prompt) => prompt,
            Err(err) => {
                warn!(error = %err, "summary prompt could not be rendered");
                return SUMMARY_FAILURE_FALLBACK.to_owned();
            }
        };
        match self.generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) | Err(TextGenerationError::EmptyResponse) => SUMMARY_EMPTY_FALLBACK.to_owned(),
            Err(TextGenerationError::MissingCredential) => {
                debug!("summary skipped: no API key configured");
                SUMMARY_MISSING_CREDENTIAL.to_owned()
            }
            Err(err) => {
                warn!(error = %err, "summary request failed");
                SUMMARY_FAILURE_FALLBACK.to_owned()
            }
        }
    }

    /// Suggests how many minutes a task will take.
    ///
    /// Falls back to [`DEFAULT_ESTIMATE_MINUTES`] on any failure or when the
    /// reply contains no number.
    pub async fn estimate_minutes(&self, title: &str, description: &str) -> u32 {
        let prompt = match estimate_prompt(title, description) {
            Ok(prompt) => prompt,
            Err(err) => {
                warn!(error = %err, "estimate prompt could not be rendered");
                return DEFAULT_ESTIMATE_MINUTES;
            }
        };
        match self.generator.generate(&prompt).await {
            Ok(reply) => first_integer(&reply).unwrap_or_else(|| {
                debug!(%reply, "estimate reply held no number");
                DEFAULT_ESTIMATE_MINUTES
            }),
            Err(TextGenerationError::MissingCredential) => DEFAULT_ESTIMATE_MINUTES,
            Err(err) => {
                warn!(error = %err, "estimate request failed");
                DEFAULT_ESTIMATE_MINUTES
            }
        }
    }
}

/// Display state of a requested summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SummaryState {
    /// The request is still running.
    #[default]
    Pending,
    /// The summary text, or a fallback message.
    Ready(String),
}

/// Transient summaries shown next to task cards.
///
/// Values live only as long as their session and are never persisted.
pub struct SummaryBoard<G>
where
    G: TextGenerator + ?Sized,
{
    assistant: TaskAssistant<G>,
    registry: Arc<SessionRegistry<SummaryState>>,
}

impl<G> SummaryBoard<G>
where
    G: TextGenerator + ?Sized + 'static,
{
    /// Creates an empty board backed by `assistant`.
    #[must_use]
    pub fn new(assistant: TaskAssistant<G>) -> Self {
        Self {
            assistant,
            registry: Arc::new(SessionRegistry::new()),
        }
    }

    /// Starts summarizing `description` for `task_id`.
    ///
    /// Any earlier request for the same task is aborted. The handle resolves
    /// to `true` once the summary is on the board and `false` if the request
    /// was superseded or dismissed first. Must be called inside a tokio
    /// runtime.
    pub fn request(
        &self,
        task_id: TaskId,
        description: impl Into<String>,
    ) -> (SessionTicket, JoinHandle<bool>) {
        let ticket = self.registry.open(task_id);
        let assistant = self.assistant.clone();
        let registry = Arc::clone(&self.registry);
        let text = description.into();
        let job_ticket = ticket.clone();
        let handle = tokio::spawn(async move {
            let summary = assistant.summarize(&text).await;
            registry.update(&job_ticket, |state| *state = SummaryState::Ready(summary))
        });
        self.registry.track(&ticket, handle.abort_handle());
        (ticket, handle)
    }

    /// Returns the summary state for `task_id`, if one was requested.
    #[must_use]
    pub fn summary(&self, task_id: &TaskId) -> Option<SummaryState> {
        self.registry.state_of(task_id)
    }

    /// Hides the summary for `task_id`, aborting it if still running.
    pub fn dismiss(&self, task_id: &TaskId) -> bool {
        self.registry.dismiss(task_id)
    }
}
