//! Validated partial update applied to a task.

use super::{Position, TaskPriority, TaskStatus, TaskTag, TaskTitle, UserId};

/// Partial task update; `None` fields are left untouched.
///
/// Nested options distinguish "leave as is" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement status; drives the completion timestamp.
    pub status: Option<TaskStatus>,
    /// Replacement or cleared assignee.
    pub assigned_to: Option<Option<UserId>>,
    /// Raw position, written as given without shifting siblings.
    pub position: Option<Position>,
    /// Replacement tag list; `Some(vec![])` removes every tag.
    pub tags: Option<Vec<TaskTag>>,
}

impl TaskEdit {
    /// Returns `true` when the edit carries an explicit position.
    #[must_use]
    pub const fn has_position(&self) -> bool {
        self.position.is_some()
    }

    /// Returns `true` when the edit replaces the tag list.
    #[must_use]
    pub const fn replaces_tags(&self) -> bool {
        self.tags.is_some()
    }

    /// Returns the assignee being set, ignoring unassignment.
    #[must_use]
    pub fn new_assignee(&self) -> Option<UserId> {
        self.assigned_to.flatten()
    }
}
