//! In-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ColumnKey, Position, PositionAllocator, Task, TaskId},
    ports::{
        ColumnPlacement, TagWrite, TaskQuery, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult, repository::sort_board_order,
    },
};

/// Thread-safe in-memory task repository.
///
/// A single write lock covers every mutation, which serialises column
/// placement across all columns.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskState {
    fn column(&self, column: ColumnKey) -> impl Iterator<Item = &Task> {
        self.tasks.values().filter(move |task| task.column() == column)
    }

    fn append_slot(&self, column: ColumnKey, excluding: TaskId) -> TaskRepositoryResult<Position> {
        PositionAllocator::append(
            self.column(column)
                .filter(|task| task.id() != excluding)
                .map(Task::position),
        )
        .map_err(|_| TaskRepositoryError::ColumnFull(column))
    }

    fn make_room(&mut self, mover: &Task) -> TaskRepositoryResult<()> {
        let column = mover.column();
        let shifts = PositionAllocator::insert_at(
            self.column(column).map(|task| (task.id(), task.position())),
            mover.id(),
            mover.position(),
        )
        .map_err(|_| TaskRepositoryError::ColumnFull(column))?;
        for (id, position) in shifts {
            if let Some(sibling) = self.tasks.get_mut(&id) {
                sibling.place_at(position);
            }
        }
        Ok(())
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        let mut stored = task.clone();
        stored.place_at(state.append_slot(task.column(), task.id())?);
        state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn save(
        &self,
        task: &Task,
        placement: ColumnPlacement,
        tags: TagWrite,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        let persisted = state
            .tasks
            .get(&task.id())
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        let mut stored = task.clone();
        if tags == TagWrite::Keep {
            stored.restore_tags(persisted.tags().to_vec());
        }

        match placement {
            ColumnPlacement::Keep => {
                stored.adopt_column(&persisted);
                stored.place_at(persisted.position());
            }
            ColumnPlacement::Reposition => stored.adopt_column(&persisted),
            ColumnPlacement::AsGiven => {}
            ColumnPlacement::Append => {
                stored.place_at(state.append_slot(stored.column(), stored.id())?);
            }
            ColumnPlacement::InsertAt => state.make_room(&stored)?,
        }

        state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        Ok(state.tasks.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| query.accepts(task))
            .cloned()
            .collect();
        sort_board_order(&mut tasks);
        Ok(tasks)
    }

    async fn max_position(&self, column: ColumnKey) -> TaskRepositoryResult<Option<Position>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.column(column).map(Task::position).max())
    }

    async fn tasks_from_position(
        &self,
        column: ColumnKey,
        from: Position,
        excluding: Option<TaskId>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<Task> = state
            .column(column)
            .filter(|task| Some(task.id()) != excluding && task.position() >= from)
            .cloned()
            .collect();
        sort_board_order(&mut tasks);
        Ok(tasks)
    }
}
