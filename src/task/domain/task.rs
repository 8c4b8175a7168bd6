//! Task aggregate root.

use super::{
    ColumnKey, Position, StatusChange, TaskEdit, TaskId, TaskPriority, TaskStatus, TaskTag,
    TaskTitle, TeamId, UserId, completion_timestamp,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A card on a team's board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    team_id: TeamId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    assigned_to: Option<UserId>,
    created_by: UserId,
    position: Position,
    completed_at: Option<DateTime<Utc>>,
    tags: Vec<TaskTag>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Owning team.
    pub team_id: TeamId,
    /// Member creating the task.
    pub created_by: UserId,
    /// Validated title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Initial column.
    pub status: TaskStatus,
    /// Initial priority.
    pub priority: TaskPriority,
    /// Optional initial assignee.
    pub assigned_to: Option<UserId>,
    /// Initial tags in display order.
    pub tags: Vec<TaskTag>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning team.
    pub team_id: TeamId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted assignee.
    pub assigned_to: Option<UserId>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted column position.
    pub position: Position,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted tags in display order.
    pub tags: Vec<TaskTag>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task that has not been placed in its column yet.
    ///
    /// The position is provisional ([`Position::FIRST`]) until the task
    /// store appends the task to its column. A task created directly in
    /// `done` is stamped as completed.
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            team_id: data.team_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            position: Position::FIRST,
            completed_at: completion_timestamp(data.status, None, clock),
            tags: data.tags,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            team_id: data.team_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            position: data.position,
            completed_at: data.completed_at,
            tags: data.tags,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning team.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current column status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the position within the current column.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns when the task entered `done`, if it is there.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the tags in display order.
    #[must_use]
    pub fn tags(&self) -> &[TaskTag] {
        &self.tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the column the task currently sits in.
    #[must_use]
    pub const fn column(&self) -> ColumnKey {
        ColumnKey::new(self.team_id, self.status)
    }

    /// Returns `true` when the task is visible to members of `team_id`.
    #[must_use]
    pub fn belongs_to(&self, team_id: TeamId) -> bool {
        self.team_id == team_id
    }

    /// Returns `true` when the title or description contains `needle`,
    /// ignoring case. An empty needle matches every task.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let lowered = needle.trim().to_lowercase();
        if lowered.is_empty() {
            return true;
        }
        self.title.as_str().to_lowercase().contains(&lowered)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&lowered))
    }

    /// Sets the status and reconciles the completion timestamp.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) -> StatusChange {
        let change = StatusChange::between(Some(self.status), status);
        self.status = status;
        self.completed_at = completion_timestamp(status, self.completed_at, clock);
        self.touch(clock);
        change
    }

    /// Moves the task to `position` in the `status` column.
    ///
    /// Only the task itself is updated; shifting the siblings of the
    /// destination column is the task store's job and must happen before
    /// this task is written.
    pub fn move_to(
        &mut self,
        status: TaskStatus,
        position: Position,
        clock: &impl Clock,
    ) -> StatusChange {
        self.position = position;
        self.set_status(status, clock)
    }

    /// Applies a partial update.
    pub fn apply_edit(&mut self, edit: TaskEdit, clock: &impl Clock) -> StatusChange {
        let TaskEdit {
            title,
            description,
            priority,
            status,
            assigned_to,
            position,
            tags,
        } = edit;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(new_assignee) = assigned_to {
            self.assigned_to = new_assignee;
        }
        if let Some(new_position) = position {
            self.position = new_position;
        }
        if let Some(new_tags) = tags {
            self.tags = new_tags;
        }

        let change = status.map_or(StatusChange::Unchanged, |new_status| {
            self.set_status(new_status, clock)
        });
        self.touch(clock);
        change
    }

    /// Sets or clears the assignee.
    pub fn assign(&mut self, assignee: Option<UserId>, clock: &impl Clock) {
        self.assigned_to = assignee;
        self.touch(clock);
    }

    /// Records the position allocated by the task store.
    pub const fn place_at(&mut self, position: Position) {
        self.position = position;
    }

    /// Takes the status and completion timestamp of the stored copy of
    /// this task, dropping whatever this copy holds.
    pub(crate) const fn adopt_column(&mut self, stored: &Self) {
        self.status = stored.status;
        self.completed_at = stored.completed_at;
    }

    /// Restores the persisted tag list when a write leaves tags untouched.
    pub(crate) fn restore_tags(&mut self, tags: Vec<TaskTag>) {
        self.tags = tags;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
