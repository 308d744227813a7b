//! StepStatus enum for tracking a single timeline step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Run state of one timeline step.
///
/// This is the only stored encoding; the `is_completed` / `is_in_progress` /
/// `is_locked` flags seen by API clients are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    #[serde(alias = "Locked")]
    Locked,
    #[serde(alias = "in-progress", alias = "InProgress")]
    InProgress,
    #[serde(alias = "Completed")]
    Completed,
}

impl StepStatus {
    /// Resolves a status from the legacy boolean flags.
    ///
    /// Completed beats in-progress, which beats locked.
    pub fn from_flags(is_completed: bool, is_in_progress: bool) -> Self {
        if is_completed {
            StepStatus::Completed
        } else if is_in_progress {
            StepStatus::InProgress
        } else {
            StepStatus::Locked
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, StepStatus::Completed)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, StepStatus::InProgress)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, StepStatus::Locked)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Locked => "Locked",
            StepStatus::InProgress => "In Progress",
            StepStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}
