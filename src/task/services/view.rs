//! Tasks as rendered to board clients.

use crate::task::domain::{MemberSummary, StatusChange, Task};

/// A task together with the member summaries shown on its card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// The stored task.
    pub task: Task,
    /// Assignee summary, when the task is assigned to a known member.
    pub assignee: Option<MemberSummary>,
    /// Creator summary, when the creator is a known member.
    pub creator: Option<MemberSummary>,
}

/// Result of a mutation that may have changed the task's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChange {
    /// The task after the mutation.
    pub view: TaskView,
    /// Whether the status differs from before the mutation.
    pub status_change: StatusChange,
}
