//! JSON envelopes returned to board clients.
//!
//! Every response carries a `success` flag. Rejections are rendered as
//! `{"success": false, "error": "..."}` rather than as transport errors.

use crate::task::{
    domain::{MemberSummary, Position, TaskId, TaskPriority, TaskStatus, TaskTag, TeamId, UserId},
    services::{Outcome, Rejection, TaskChange, TaskView},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Message returned after a successful move.
pub const MOVED_MESSAGE: &str = "Task moved successfully";
/// Message returned after a successful assignment change.
pub const ASSIGNED_MESSAGE: &str = "Task assignment updated.";
/// Message returned after a successful deletion.
pub const DELETED_MESSAGE: &str = "Task deleted with a smooth goodbye.";

/// A task as serialised on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    /// Task identifier.
    pub id: TaskId,
    /// Owning team.
    pub team_id: TeamId,
    /// Title.
    pub title: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Column status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Position within the column.
    pub position: Position,
    /// When the task entered `done`.
    pub completed_at: Option<DateTime<Utc>>,
    /// Assignee identifier.
    pub assigned_to: Option<UserId>,
    /// Creator identifier.
    pub created_by: UserId,
    /// Assignee summary.
    pub assigned_user: Option<MemberSummary>,
    /// Creator summary.
    pub creator: Option<MemberSummary>,
    /// Tags in display order.
    pub tags: Vec<TaskTag>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<TaskView> for TaskPayload {
    fn from(view: TaskView) -> Self {
        let TaskView {
            task,
            assignee,
            creator,
        } = view;
        Self {
            id: task.id(),
            team_id: task.team_id(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status(),
            priority: task.priority(),
            position: task.position(),
            completed_at: task.completed_at(),
            assigned_to: task.assigned_to(),
            created_by: task.created_by(),
            assigned_user: assignee,
            creator,
            tags: task.tags().to_vec(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Either a successful body or a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// The operation ran.
    Success(T),
    /// The operation was refused.
    Rejected(RejectionBody),
}

impl<T> Envelope<T> {
    fn from_outcome<U>(outcome: Outcome<U>, body: impl FnOnce(U) -> T) -> Self {
        match outcome.map(body) {
            Outcome::Applied(value) => Self::Success(value),
            Outcome::Rejected(rejection) => Self::Rejected(RejectionBody::from(&rejection)),
        }
    }
}

/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionBody {
    /// Always `false`.
    pub success: bool,
    /// Human-readable reason.
    pub error: String,
}

impl From<&Rejection> for RejectionBody {
    fn from(rejection: &Rejection) -> Self {
        Self {
            success: false,
            error: rejection.to_string(),
        }
    }
}

/// Body of a board listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskListBody {
    /// Always `true`.
    pub success: bool,
    /// Tasks in board order.
    pub tasks: Vec<TaskPayload>,
}

/// Body carrying one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskBody {
    /// Always `true`.
    pub success: bool,
    /// Confirmation message, when the operation has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The task after the operation.
    pub task: TaskPayload,
}

/// Body carrying one task and the status-change signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskChangeBody {
    /// Always `true`.
    pub success: bool,
    /// Confirmation message, when the operation has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The task after the operation.
    pub task: TaskPayload,
    /// New status, or `null` when the status did not change.
    pub status_changed_to: Option<TaskStatus>,
}

impl TaskChangeBody {
    fn new(change: TaskChange, message: Option<&str>) -> Self {
        Self {
            success: true,
            message: message.map(str::to_owned),
            task: TaskPayload::from(change.view),
            status_changed_to: change.status_change.changed_to(),
        }
    }
}

/// Body carrying only a confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    /// Always `true`.
    pub success: bool,
    /// Confirmation message.
    pub message: String,
}

/// Renders a board listing.
#[must_use]
pub fn list_envelope(views: Vec<TaskView>) -> TaskListBody {
    TaskListBody {
        success: true,
        tasks: views.into_iter().map(TaskPayload::from).collect(),
    }
}

/// Renders the result of a create.
#[must_use]
pub fn create_envelope(outcome: Outcome<TaskView>) -> Envelope<TaskBody> {
    Envelope::from_outcome(outcome, |view| TaskBody {
        success: true,
        message: None,
        task: TaskPayload::from(view),
    })
}

/// Renders the result of an update.
#[must_use]
pub fn update_envelope(outcome: Outcome<TaskChange>) -> Envelope<TaskChangeBody> {
    Envelope::from_outcome(outcome, |change| TaskChangeBody::new(change, None))
}

/// Renders the result of a move.
#[must_use]
pub fn move_envelope(outcome: Outcome<TaskChange>) -> Envelope<TaskChangeBody> {
    Envelope::from_outcome(outcome, |change| {
        TaskChangeBody::new(change, Some(MOVED_MESSAGE))
    })
}

/// Renders the result of an assignment change.
#[must_use]
pub fn assign_envelope(outcome: Outcome<TaskView>) -> Envelope<TaskBody> {
    Envelope::from_outcome(outcome, |view| TaskBody {
        success: true,
        message: Some(ASSIGNED_MESSAGE.to_owned()),
        task: TaskPayload::from(view),
    })
}

/// Renders the result of a deletion.
#[must_use]
pub fn delete_envelope(outcome: Outcome<()>) -> Envelope<MessageBody> {
    Envelope::from_outcome(outcome, |()| MessageBody {
        success: true,
        message: DELETED_MESSAGE.to_owned(),
    })
}
