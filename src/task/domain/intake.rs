//! Client intake form values and their validation.

use super::{Priority, TaskDomainError};
use std::fmt;

/// Required free-text fields of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeField {
    /// Short summary of the fault.
    Title,
    /// Full fault description.
    Description,
    /// Service address.
    Address,
    /// Reporting client's name.
    ClientName,
}

impl IntakeField {
    /// Returns a human-readable field label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Address => "address",
            Self::ClientName => "client name",
        }
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw values submitted through the client intake form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    title: String,
    description: String,
    address: String,
    client_name: String,
    priority: Priority,
}

impl IntakeForm {
    /// Creates a form with the required free-text fields and default
    /// [`Priority::Medium`].
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        address: impl Into<String>,
        client_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            address: address.into(),
            client_name: client_name.into(),
            priority: Priority::default(),
        }
    }

    /// Sets the requested priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Validates the form at the intake boundary.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyField`] for the first required field
    /// that is empty after trimming, checked in form order.
    pub fn validate(self) -> Result<NewTask, TaskDomainError> {
        Ok(NewTask {
            title: required(self.title, IntakeField::Title)?,
            description: required(self.description, IntakeField::Description)?,
            address: required(self.address, IntakeField::Address)?,
            client_name: required(self.client_name, IntakeField::ClientName)?,
            priority: self.priority,
        })
    }
}

fn required(value: String, field: IntakeField) -> Result<String, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyField(field));
    }
    Ok(trimmed.to_owned())
}

/// Intake data that has passed boundary validation.
///
/// Only [`IntakeForm::validate`] produces values of this type, so the task
/// store can trust every free-text field to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) client_name: String,
    pub(crate) address: String,
    pub(crate) priority: Priority,
}

impl NewTask {
    /// Returns the validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the requested priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }
}
