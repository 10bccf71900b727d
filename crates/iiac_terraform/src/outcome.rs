//! Outcomes of best-effort steps.

use std::fmt;

use serde::Serialize;

/// What happened to a step whose failure must not abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum StepOutcome {
    Done,
    /// Not attempted, e.g. an optional template that does not exist.
    Skipped(String),
    /// Attempted and failed; the failure was ignored.
    FailedIgnored(String),
}

impl StepOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, StepOutcome::Done)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StepOutcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::FailedIgnored(_))
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Done => write!(f, "done"),
            StepOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
            StepOutcome::FailedIgnored(reason) => write!(f, "failed, ignored ({})", reason),
        }
    }
}
