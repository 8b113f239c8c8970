//! Completion report submitted by a technician.

use super::{Photo, TechnicianName};

/// Optional details adopted by a task when it enters `Completed`.
///
/// Every field is optional; omitted fields leave the task's previous value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionReport {
    pub(crate) time_spent_minutes: Option<u32>,
    pub(crate) worker_notes: Option<String>,
    pub(crate) photo_after: Option<Photo>,
    pub(crate) completed_by: Option<TechnicianName>,
}

impl CompletionReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minutes of work.
    #[must_use]
    pub const fn with_time_spent_minutes(mut self, minutes: u32) -> Self {
        self.time_spent_minutes = Some(minutes);
        self
    }

    /// Sets the technician's notes.
    #[must_use]
    pub fn with_worker_notes(mut self, notes: impl Into<String>) -> Self {
        self.worker_notes = Some(notes.into());
        self
    }

    /// Attaches a normalized photo.
    #[must_use]
    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photo_after = Some(photo);
        self
    }

    /// Attaches a photo when one is available.
    #[must_use]
    pub fn with_optional_photo(mut self, photo: Option<Photo>) -> Self {
        if photo.is_some() {
            self.photo_after = photo;
        }
        self
    }

    /// Names the technician who did the work.
    #[must_use]
    pub fn with_completed_by(mut self, technician: TechnicianName) -> Self {
        self.completed_by = Some(technician);
        self
    }

    /// Returns the technician named in the report, if any.
    #[must_use]
    pub const fn completed_by(&self) -> Option<&TechnicianName> {
        self.completed_by.as_ref()
    }

    /// Returns `true` when the report carries no details.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.time_spent_minutes.is_none()
            && self.worker_notes.is_none()
            && self.photo_after.is_none()
            && self.completed_by.is_none()
    }
}
