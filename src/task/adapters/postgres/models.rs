//! Diesel row models for task board persistence.

use super::schema::{task_tags, tasks, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Owning team.
    pub team_id: Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Column status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Optional assignee.
    pub assigned_to: Option<Uuid>,
    /// Creating user.
    pub created_by: Uuid,
    /// Column position.
    pub position: i32,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Owning team.
    pub team_id: Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Column status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Optional assignee.
    pub assigned_to: Option<Uuid>,
    /// Creating user.
    pub created_by: Uuid,
    /// Column position.
    pub position: i32,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Full-row update model; `None` values are written as `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Column status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Optional assignee.
    pub assigned_to: Option<Uuid>,
    /// Column position.
    pub position: i32,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for tag records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TagRow {
    /// Owning task.
    pub task_id: Uuid,
    /// Tag name.
    pub name: String,
    /// Tag color.
    pub color: String,
}

/// Insert model for tag records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_tags)]
pub struct NewTagRow {
    /// Tag row identifier.
    pub id: Uuid,
    /// Owning task.
    pub task_id: Uuid,
    /// Tag name.
    pub name: String,
    /// Tag color.
    pub color: String,
    /// Display order within the task.
    pub sort_order: i32,
}

/// Query result row for team members.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    /// User identifier.
    pub id: Uuid,
    /// Team the user belongs to.
    pub team_id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Optional avatar color.
    pub avatar_color: Option<String>,
}
