//! Transition policy for the task lifecycle state machine.

use super::TaskStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which status changes the task store accepts.
///
/// Both policies only ever move forward, refuse same-status updates, and
/// treat [`TaskStatus::Completed`] as terminal, so a completion timestamp is
/// never rewritten once stamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Only single steps: `Pending -> InProgress -> Completed`.
    #[default]
    Strict,
    /// Also allows skipping straight from `Pending` to `Completed`.
    Permissive,
}

impl TransitionPolicy {
    /// Returns `true` when the policy permits moving from `from` to `to`.
    #[must_use]
    pub const fn permits(self, from: TaskStatus, to: TaskStatus) -> bool {
        if from.is_terminal() || to.rank() <= from.rank() {
            return false;
        }
        match self {
            Self::Strict => to.rank() == from.rank() + 1,
            Self::Permissive => true,
        }
    }

    /// Returns the canonical configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Permissive => "permissive",
        }
    }
}

impl TryFrom<&str> for TransitionPolicy {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            _ => Err(value.to_owned()),
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
