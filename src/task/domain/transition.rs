//! Status transition rules.
//!
//! The completion timestamp tracks the `done` column:
//!
//! - entering `done` without a timestamp stamps the current time;
//! - re-entering `done` keeps the existing timestamp;
//! - any other status clears it.

use super::TaskStatus;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Whether an operation moved a task to a different status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "status")]
pub enum StatusChange {
    /// The status is the same as before the operation.
    Unchanged,
    /// The status changed to the given value.
    ChangedTo(TaskStatus),
}

impl StatusChange {
    /// Compares the status before and after an operation.
    ///
    /// A task with no prior status (creation) always counts as changed.
    #[must_use]
    pub fn between(previous: Option<TaskStatus>, current: TaskStatus) -> Self {
        if previous == Some(current) {
            Self::Unchanged
        } else {
            Self::ChangedTo(current)
        }
    }

    /// Returns the new status when it changed.
    #[must_use]
    pub const fn changed_to(self) -> Option<TaskStatus> {
        match self {
            Self::Unchanged => None,
            Self::ChangedTo(status) => Some(status),
        }
    }

    /// Returns `true` when the status changed.
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::ChangedTo(_))
    }
}

/// Returns the completion timestamp a task must carry after its status is
/// set to `status`.
#[must_use]
pub fn completion_timestamp(
    status: TaskStatus,
    current: Option<DateTime<Utc>>,
    clock: &impl Clock,
) -> Option<DateTime<Utc>> {
    if !status.is_done() {
        return None;
    }
    current.or_else(|| Some(clock.utc()))
}
