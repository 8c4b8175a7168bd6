//! Repository port for task persistence and column placement.

use crate::task::domain::{ColumnKey, Position, Task, TaskId, TeamId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// How a saved task claims its slot in its column.
///
/// Placement runs in the same critical section as the write, serialised per
/// column, so concurrent writers never compute the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPlacement {
    /// Keep the stored status, completion timestamp and position.
    ///
    /// The store reads them inside the write's critical section, so a move
    /// that lands after the task was loaded is never undone.
    Keep,
    /// Keep the stored status and completion timestamp, and write the
    /// task's position as given; siblings are untouched.
    Reposition,
    /// Write the task's status and position as given; siblings are
    /// untouched.
    AsGiven,
    /// Place the task after the current maximum of its column.
    Append,
    /// Shift siblings at or after the task's position up by one, then
    /// write the task at that position.
    InsertAt,
}

/// Whether a save rewrites the task's tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagWrite {
    /// Leave persisted tags as they are.
    Keep,
    /// Delete every persisted tag and insert the task's current list.
    Replace,
}

/// Filters applied when listing a team's tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Team whose board is listed.
    pub team_id: TeamId,
    /// Only tasks assigned to this user, when set.
    pub assigned_to: Option<UserId>,
    /// Case-insensitive substring matched against title or description.
    pub search: Option<String>,
}

impl TaskQuery {
    /// Creates an unfiltered query for a team's board.
    #[must_use]
    pub const fn for_team(team_id: TeamId) -> Self {
        Self {
            team_id,
            assigned_to: None,
            search: None,
        }
    }

    /// Restricts the query to one assignee.
    #[must_use]
    pub const fn assigned_to(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    /// Restricts the query to tasks matching `search`.
    #[must_use]
    pub fn matching(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns `true` when `task` satisfies every filter.
    #[must_use]
    pub fn accepts(&self, task: &Task) -> bool {
        task.belongs_to(self.team_id)
            && self
                .assigned_to
                .is_none_or(|user_id| task.assigned_to() == Some(user_id))
            && self
                .search
                .as_deref()
                .is_none_or(|needle| task.matches_search(needle))
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Appends a new task to its column and stores it with its tags.
    ///
    /// Returns the stored task carrying its allocated position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists and [`TaskRepositoryError::ColumnFull`] when the
    /// column already reaches [`Position::MAX`].
    async fn create(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Persists a full update of an existing task.
    ///
    /// Returns the stored task, whose placement may differ from the input
    /// for [`ColumnPlacement::Keep`], [`ColumnPlacement::Reposition`] and
    /// [`ColumnPlacement::Append`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist and [`TaskRepositoryError::ColumnFull`] when placement would
    /// run past [`Position::MAX`].
    async fn save(
        &self,
        task: &Task,
        placement: ColumnPlacement,
        tags: TagWrite,
    ) -> TaskRepositoryResult<Task>;

    /// Hard-deletes a task together with its tags.
    ///
    /// Returns `false` when no task had the given ID.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists tasks matching `query`, ordered by column then position.
    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the highest position in a column, or `None` when it is empty.
    async fn max_position(&self, column: ColumnKey) -> TaskRepositoryResult<Option<Position>>;

    /// Returns the tasks of a column at or after `from`, excluding
    /// `excluding`, ordered by position.
    async fn tasks_from_position(
        &self,
        column: ColumnKey,
        from: Position,
        excluding: Option<TaskId>,
    ) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The column has no slot left for an append or a shift.
    #[error("column {0} has no position left")]
    ColumnFull(ColumnKey),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Sorts tasks into board order: column, then position, then age.
pub fn sort_board_order(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| {
        (
            task.status().column_rank(),
            task.position(),
            task.created_at(),
        )
    });
}
