//! `PostgreSQL` repository implementation for task board storage.
//!
//! Column placement runs inside one transaction that first takes a
//! transaction-scoped advisory lock keyed by the `(team, status)` column, so
//! two writers appending to or inserting into the same column are applied
//! one after the other.

use super::{
    models::{NewTagRow, NewTaskRow, TagRow, TaskChangeset, TaskRow},
    schema::{task_tags, tasks},
};
use crate::task::{
    domain::{
        ColumnKey, PersistedTaskData, Position, Task, TaskId, TaskPriority, TaskStatus, TaskTag,
        TaskTitle, TeamId, UserId,
    },
    ports::{
        ColumnPlacement, TagWrite, TaskQuery, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult, repository::sort_board_order,
    },
};
use async_trait::async_trait;
use diesel::dsl::max;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Text;
use std::collections::HashMap;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by task board adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &TaskPgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut stored = task.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let column = stored.column();
                lock_column(tx, column)?;
                stored.place_at(append_slot(tx, column, stored.id())?);
                insert_task(tx, &stored)?;
                insert_tags(tx, &stored)?;
                Ok(stored)
            })
        })
        .await
    }

    async fn save(
        &self,
        task: &Task,
        placement: ColumnPlacement,
        tags: TagWrite,
    ) -> TaskRepositoryResult<Task> {
        let mut stored = task.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                match placement {
                    ColumnPlacement::Keep => {
                        let persisted = lock_row(tx, stored.id())?;
                        stored.adopt_column(&persisted);
                        stored.place_at(persisted.position());
                    }
                    ColumnPlacement::Reposition => {
                        let persisted = lock_row(tx, stored.id())?;
                        stored.adopt_column(&persisted);
                    }
                    ColumnPlacement::AsGiven => {}
                    ColumnPlacement::Append => {
                        let column = stored.column();
                        lock_column(tx, column)?;
                        stored.place_at(append_slot(tx, column, stored.id())?);
                    }
                    ColumnPlacement::InsertAt => {
                        let column = stored.column();
                        lock_column(tx, column)?;
                        shift_siblings(tx, column, stored.position(), stored.id())?;
                    }
                }

                update_task(tx, &stored)?;

                match tags {
                    TagWrite::Keep => {
                        let task_id = stored.id().into_inner();
                        let persisted = load_tags(tx, vec![task_id])?
                            .remove(&task_id)
                            .unwrap_or_default();
                        stored.restore_tags(persisted);
                    }
                    TagWrite::Replace => replace_tags(tx, &stored)?,
                }
                Ok(stored)
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner())).execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            let Some(found) = row else {
                return Ok(None);
            };
            let mut loaded = rows_to_tasks(connection, vec![found])?;
            Ok(loaded.pop())
        })
        .await
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let filter = query.clone();
        self.run_blocking(move |connection| {
            let mut statement = tasks::table
                .filter(tasks::team_id.eq(filter.team_id.into_inner()))
                .select(TaskRow::as_select())
                .order(tasks::position.asc())
                .into_boxed();
            if let Some(assignee) = filter.assigned_to {
                statement = statement.filter(tasks::assigned_to.eq(assignee.into_inner()));
            }
            let rows = statement.load::<TaskRow>(connection)?;

            let mut found: Vec<Task> = rows_to_tasks(connection, rows)?
                .into_iter()
                .filter(|task| filter.accepts(task))
                .collect();
            sort_board_order(&mut found);
            Ok(found)
        })
        .await
    }

    async fn max_position(&self, column: ColumnKey) -> TaskRepositoryResult<Option<Position>> {
        self.run_blocking(move |connection| max_position_in(connection, column, None))
            .await
    }

    async fn tasks_from_position(
        &self,
        column: ColumnKey,
        from: Position,
        excluding: Option<TaskId>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut statement = tasks::table
                .filter(tasks::team_id.eq(column.team_id().into_inner()))
                .filter(tasks::status.eq(column.status().as_str()))
                .filter(tasks::position.ge(position_to_column(from)?))
                .select(TaskRow::as_select())
                .order(tasks::position.asc())
                .into_boxed();
            if let Some(id) = excluding {
                statement = statement.filter(tasks::id.ne(id.into_inner()));
            }
            let rows = statement.load::<TaskRow>(connection)?;
            rows_to_tasks(connection, rows)
        })
        .await
    }
}

fn lock_column(connection: &mut PgConnection, column: ColumnKey) -> TaskRepositoryResult<()> {
    diesel::sql_query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind::<Text, _>(column.to_string())
        .execute(connection)?;
    Ok(())
}

/// Reads the stored row under a row lock held until the transaction ends,
/// so a concurrent shift or move of the same task waits for this write.
fn lock_row(connection: &mut PgConnection, id: TaskId) -> TaskRepositoryResult<Task> {
    let row = tasks::table
        .find(id.into_inner())
        .select(TaskRow::as_select())
        .for_update()
        .first::<TaskRow>(connection)
        .optional()?
        .ok_or(TaskRepositoryError::NotFound(id))?;
    row_to_task(row, Vec::new())
}

fn append_slot(
    connection: &mut PgConnection,
    column: ColumnKey,
    excluding: TaskId,
) -> TaskRepositoryResult<Position> {
    let max_position = max_position_in(connection, column, Some(excluding))?;
    Position::after(max_position).map_err(|_| TaskRepositoryError::ColumnFull(column))
}

fn max_position_in(
    connection: &mut PgConnection,
    column: ColumnKey,
    excluding: Option<TaskId>,
) -> TaskRepositoryResult<Option<Position>> {
    let mut statement = tasks::table
        .filter(tasks::team_id.eq(column.team_id().into_inner()))
        .filter(tasks::status.eq(column.status().as_str()))
        .select(max(tasks::position))
        .into_boxed();
    if let Some(id) = excluding {
        statement = statement.filter(tasks::id.ne(id.into_inner()));
    }
    let value: Option<i32> = statement.get_result(connection)?;
    value.map(position_from_column).transpose()
}

fn shift_siblings(
    connection: &mut PgConnection,
    column: ColumnKey,
    target: Position,
    mover: TaskId,
) -> TaskRepositoryResult<()> {
    // Any sibling at the last slot is displaced and would overflow.
    if max_position_in(connection, column, Some(mover))? == Some(Position::MAX) {
        return Err(TaskRepositoryError::ColumnFull(column));
    }
    diesel::update(
        tasks::table
            .filter(tasks::team_id.eq(column.team_id().into_inner()))
            .filter(tasks::status.eq(column.status().as_str()))
            .filter(tasks::id.ne(mover.into_inner()))
            .filter(tasks::position.ge(position_to_column(target)?)),
    )
    .set(tasks::position.eq(tasks::position + 1))
    .execute(connection)?;
    Ok(())
}

fn insert_task(connection: &mut PgConnection, task: &Task) -> TaskRepositoryResult<()> {
    let task_id = task.id();
    let new_row = to_new_row(task)?;
    diesel::insert_into(tasks::table)
        .values(&new_row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                TaskRepositoryError::DuplicateTask(task_id)
            }
            _ => TaskRepositoryError::persistence(err),
        })?;
    Ok(())
}

fn update_task(connection: &mut PgConnection, task: &Task) -> TaskRepositoryResult<()> {
    let changeset = to_changeset(task)?;
    let updated_count = diesel::update(tasks::table.find(task.id().into_inner()))
        .set(&changeset)
        .execute(connection)?;
    if updated_count == 0 {
        return Err(TaskRepositoryError::NotFound(task.id()));
    }
    Ok(())
}

fn replace_tags(connection: &mut PgConnection, task: &Task) -> TaskRepositoryResult<()> {
    diesel::delete(task_tags::table.filter(task_tags::task_id.eq(task.id().into_inner())))
        .execute(connection)?;
    insert_tags(connection, task)
}

fn insert_tags(connection: &mut PgConnection, task: &Task) -> TaskRepositoryResult<()> {
    let task_id = task.id().into_inner();
    let rows = task
        .tags()
        .iter()
        .enumerate()
        .map(|(index, tag)| {
            let sort_order = i32::try_from(index).map_err(TaskRepositoryError::persistence)?;
            Ok(NewTagRow {
                id: Uuid::new_v4(),
                task_id,
                name: tag.name().to_owned(),
                color: tag.color().to_owned(),
                sort_order,
            })
        })
        .collect::<TaskRepositoryResult<Vec<_>>>()?;

    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(task_tags::table)
        .values(&rows)
        .execute(connection)?;
    Ok(())
}

fn load_tags(
    connection: &mut PgConnection,
    task_ids: Vec<Uuid>,
) -> TaskRepositoryResult<HashMap<Uuid, Vec<TaskTag>>> {
    let rows = task_tags::table
        .filter(task_tags::task_id.eq_any(task_ids))
        .order((task_tags::task_id.asc(), task_tags::sort_order.asc()))
        .select(TagRow::as_select())
        .load::<TagRow>(connection)?;

    let mut grouped: HashMap<Uuid, Vec<TaskTag>> = HashMap::new();
    for row in rows {
        let tag = TaskTag::new(row.name, row.color).map_err(TaskRepositoryError::persistence)?;
        grouped.entry(row.task_id).or_default().push(tag);
    }
    Ok(grouped)
}

fn rows_to_tasks(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> TaskRepositoryResult<Vec<Task>> {
    let task_ids = rows.iter().map(|row| row.id).collect();
    let mut tags = load_tags(connection, task_ids)?;
    rows.into_iter()
        .map(|row| {
            let row_tags = tags.remove(&row.id).unwrap_or_default();
            row_to_task(row, row_tags)
        })
        .collect()
}

fn position_from_column(value: i32) -> TaskRepositoryResult<Position> {
    Position::try_from(i64::from(value)).map_err(TaskRepositoryError::persistence)
}

fn position_to_column(position: Position) -> TaskRepositoryResult<i32> {
    i32::try_from(position.value()).map_err(TaskRepositoryError::persistence)
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        team_id: task.team_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        created_by: task.created_by().into_inner(),
        position: position_to_column(task.position())?,
        completed_at: task.completed_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskChangeset> {
    Ok(TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        position: position_to_column(task.position())?,
        completed_at: task.completed_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow, tags: Vec<TaskTag>) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        team_id,
        title: persisted_title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        assigned_to,
        created_by,
        position: persisted_position,
        completed_at,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        team_id: TeamId::from_uuid(team_id),
        title,
        description,
        status,
        priority,
        assigned_to: assigned_to.map(UserId::from_uuid),
        created_by: UserId::from_uuid(created_by),
        position: position_from_column(persisted_position)?,
        completed_at,
        tags,
        created_at,
        updated_at,
    }))
}
