//! Technician names and the fixed worker roster.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a technician, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TechnicianName(String);

impl TechnicianName {
    /// Creates a validated technician name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTechnicianName`] when the name is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTechnicianName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TechnicianName {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TechnicianName> for String {
    fn from(name: TechnicianName) -> Self {
        name.0
    }
}

impl AsRef<str> for TechnicianName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TechnicianName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Enumerated set of technicians who may complete tasks.
///
/// Order is preserved; the first technician is the completion form's
/// default selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRoster {
    technicians: Vec<TechnicianName>,
}

impl WorkerRoster {
    /// Creates a roster from technician names, dropping duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyRoster`] when no names are given, or
    /// [`TaskDomainError::EmptyTechnicianName`] when any name is blank.
    pub fn new<I, S>(names: I) -> Result<Self, TaskDomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut technicians: Vec<TechnicianName> = Vec::new();
        for name in names {
            let technician = TechnicianName::new(name)?;
            if !technicians.contains(&technician) {
                technicians.push(technician);
            }
        }
        if technicians.is_empty() {
            return Err(TaskDomainError::EmptyRoster);
        }
        Ok(Self { technicians })
    }

    /// Returns the technicians in roster order.
    #[must_use]
    pub fn technicians(&self) -> &[TechnicianName] {
        &self.technicians
    }

    /// Returns the default selection for the completion form.
    #[must_use]
    pub fn default_technician(&self) -> Option<&TechnicianName> {
        self.technicians.first()
    }

    /// Returns `true` when the technician is on the roster.
    #[must_use]
    pub fn contains(&self, technician: &TechnicianName) -> bool {
        self.technicians.contains(technician)
    }

    /// Looks up a roster member by name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownTechnician`] when the name is not on
    /// the roster.
    pub fn find(&self, name: &str) -> Result<TechnicianName, TaskDomainError> {
        let technician = TechnicianName::new(name)?;
        self.verify(&technician)?;
        Ok(technician)
    }

    /// Checks that the technician is on the roster.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownTechnician`] when it is not.
    pub fn verify(&self, technician: &TechnicianName) -> Result<(), TaskDomainError> {
        if self.contains(technician) {
            Ok(())
        } else {
            Err(TaskDomainError::UnknownTechnician(technician.clone()))
        }
    }
}

impl Default for WorkerRoster {
    fn default() -> Self {
        Self {
            technicians: DEFAULT_ROSTER
                .iter()
                .map(|name| TechnicianName((*name).to_owned()))
                .collect(),
        }
    }
}

/// Technicians on the roster when no configuration overrides it.
pub const DEFAULT_ROSTER: [&str; 4] = [
    "Piotr Rybicki",
    "Rafał Mańkut",
    "Tomasz Dubiela",
    "Grzegorz Chrust",
];
