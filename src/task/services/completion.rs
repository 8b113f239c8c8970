//! Completion form sessions with background photo normalization.

use crate::{
    photo::{PhotoError, PhotoNormalizer},
    session::{SessionRegistry, SessionTicket},
    task::{
        domain::{CompletionReport, Photo, Task, TaskId},
        ports::TaskPersistence,
        services::{TaskLifecycleError, TaskStore},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::debug;

/// State collected while a completion form is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionDraft {
    photo: Option<Photo>,
    photo_failure: Option<PhotoError>,
}

impl CompletionDraft {
    /// Returns the normalized photo, once available.
    #[must_use]
    pub const fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    /// Returns the last normalization failure, if any.
    #[must_use]
    pub const fn photo_failure(&self) -> Option<&PhotoError> {
        self.photo_failure.as_ref()
    }
}

/// Errors returned when submitting a completion form.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The form was closed or reopened before submission.
    #[error("completion form for task {0} is no longer open")]
    StaleSession(TaskId),

    /// The task store refused the completion.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
}

/// Open completion forms, one per task.
#[derive(Debug, Clone, Default)]
pub struct CompletionSessions {
    registry: Arc<SessionRegistry<CompletionDraft>>,
    normalizer: PhotoNormalizer,
}

impl CompletionSessions {
    /// Creates an empty set of sessions using `normalizer` for uploads.
    #[must_use]
    pub fn new(normalizer: PhotoNormalizer) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new()),
            normalizer,
        }
    }

    /// Opens the completion form for `task_id`, discarding any earlier draft.
    pub fn open(&self, task_id: TaskId) -> SessionTicket {
        self.registry.open(task_id)
    }

    /// Returns the draft for `ticket` while it is still current.
    #[must_use]
    pub fn draft(&self, ticket: &SessionTicket) -> Option<CompletionDraft> {
        self.registry.state(ticket)
    }

    /// Normalizes `raw` in the background and attaches it to the draft.
    ///
    /// The handle resolves to `true` when the result reached the draft and
    /// `false` when the form had already moved on. Closing the form aborts
    /// the job. Must be called inside a tokio runtime.
    pub fn attach_photo(&self, ticket: &SessionTicket, raw: Vec<u8>) -> JoinHandle<bool> {
        let registry = Arc::clone(&self.registry);
        let normalizer = self.normalizer;
        let job_ticket = ticket.clone();
        let handle = tokio::spawn(async move {
            let outcome = normalizer.normalize(raw).await;
            registry.update(&job_ticket, |draft| match outcome {
                Ok(photo) => {
                    draft.photo = Some(photo);
                    draft.photo_failure = None;
                }
                Err(err) => draft.photo_failure = Some(err),
            })
        });
        self.registry.track(ticket, handle.abort_handle());
        handle
    }

    /// Closes the form and completes the task with `report`.
    ///
    /// A photo already attached to the draft is used when the report has
    /// none of its own.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::StaleSession`] when `ticket` no longer
    /// names the open form, and [`CompletionError::Lifecycle`] when the
    /// store rejects the completion.
    pub fn submit<P, C>(
        &self,
        ticket: &SessionTicket,
        store: &TaskStore<P, C>,
        report: CompletionReport,
    ) -> Result<Option<Task>, CompletionError>
    where
        P: TaskPersistence,
        C: Clock + Send + Sync,
    {
        let draft = self
            .registry
            .close(ticket)
            .ok_or_else(|| CompletionError::StaleSession(ticket.task_id().clone()))?;
        let merged = if report.photo_after.is_none() {
            report.with_optional_photo(draft.photo)
        } else {
            report
        };
        Ok(store.complete(ticket.task_id().clone(), merged)?)
    }

    /// Closes the form for `task_id` without completing the task.
    pub fn dismiss(&self, task_id: &TaskId) -> bool {
        let dismissed = self.registry.dismiss(task_id);
        if dismissed {
            debug!(task_id = %task_id, "completion form dismissed");
        }
        dismissed
    }
}
