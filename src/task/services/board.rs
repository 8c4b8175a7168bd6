//! Board orchestration: listing, creation, edits, moves, assignment and
//! deletion of a team's tasks.

use super::{
    outcome::{BoardAction, Outcome, Rejection},
    requests::{CreateTaskRequest, TaskListFilter, UpdateTaskRequest},
    view::{TaskChange, TaskView},
};
use crate::task::{
    domain::{
        MemberSummary, NewTaskData, Position, Task, TaskDomainError, TaskId, TaskStatus,
        TaskTitle, TeamId, TeamMember, UserId, tags_for_create,
    },
    ports::{
        ColumnPlacement, TagWrite, TaskQuery, TaskRepository, TaskRepositoryError, TeamDirectory,
        TeamDirectoryError,
    },
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for board operations.
///
/// Rejections are not errors; see [`Outcome`].
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task store operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Team directory lookup failed.
    #[error(transparent)]
    Directory(#[from] TeamDirectoryError),
    /// No task has the given identifier.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

/// Result type for board service operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

type SummaryCache = HashMap<UserId, Option<MemberSummary>>;

/// Task board orchestration service.
#[derive(Clone)]
pub struct TaskBoardService<R, D, C>
where
    R: TaskRepository,
    D: TeamDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<R, D, C> TaskBoardService<R, D, C>
where
    R: TaskRepository,
    D: TeamDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
        }
    }

    /// Lists a team's tasks in board order.
    ///
    /// `caller` resolves [`super::AssigneeFilter::Caller`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError`] when the store or directory fails.
    pub async fn list(
        &self,
        team_id: TeamId,
        caller: UserId,
        filter: TaskListFilter,
    ) -> TaskBoardResult<Vec<TaskView>> {
        debug!(%team_id, %caller, ?filter, "listing board");
        let mut query = TaskQuery::for_team(team_id);
        if let Some(assignee) = filter.assignee.resolve(caller) {
            query = query.assigned_to(assignee);
        }
        if let Some(search) = filter.search {
            query = query.matching(search);
        }

        let tasks = self.repository.list(&query).await?;
        let mut summaries: SummaryCache = self
            .directory
            .list_members(team_id)
            .await?
            .iter()
            .map(|member| (member.id(), Some(member.summary())))
            .collect();

        let mut views = Vec::with_capacity(tasks.len());
        for task in tasks {
            views.push(self.render(task, &mut summaries).await?);
        }
        Ok(views)
    }

    /// Lists a team's members ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Directory`] when the lookup fails.
    pub async fn list_members(&self, team_id: TeamId) -> TaskBoardResult<Vec<TeamMember>> {
        Ok(self.directory.list_members(team_id).await?)
    }

    /// Creates a task at the end of its column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for an invalid title or tag and
    /// [`TaskBoardError::Repository`] when the store fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskBoardResult<Outcome<TaskView>> {
        let CreateTaskRequest {
            team_id,
            created_by,
            title: raw_title,
            description,
            status,
            priority,
            assigned_to,
            tags: tag_inputs,
        } = request;
        debug!(%team_id, %created_by, %status, "creating task");

        let title = TaskTitle::new(raw_title)?;
        let tags = tags_for_create(tag_inputs)?;
        if let Some(assignee) = assigned_to
            && let Some(rejection) = self.check_assignee(team_id, assignee).await?
        {
            return Ok(rejected(rejection, None));
        }

        let task = Task::new(
            NewTaskData {
                team_id,
                created_by,
                title,
                description,
                status,
                priority,
                assigned_to,
                tags,
            },
            &*self.clock,
        );
        let stored = self.repository.create(&task).await?;
        info!(
            task_id = %stored.id(),
            column = %stored.column(),
            position = %stored.position(),
            "task created"
        );
        Ok(Outcome::Applied(self.render_one(stored).await?))
    }

    /// Applies a partial update.
    ///
    /// A status change without an explicit position appends the task to
    /// the new column. An explicit position is written as given. Without a
    /// status change the stored status is kept, so a move that lands while
    /// the update is being checked is not undone.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] for an unknown task,
    /// [`TaskBoardError::Domain`] for an invalid patch and
    /// [`TaskBoardError::Repository`] when the store fails.
    pub async fn update(
        &self,
        team_id: TeamId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskBoardResult<Outcome<TaskChange>> {
        debug!(%team_id, %task_id, "updating task");
        let mut task = self.load(task_id).await?;
        if !task.belongs_to(team_id) {
            return Ok(rejected(
                Rejection::CrossTeam(BoardAction::Update),
                Some(task_id),
            ));
        }

        let edit = request.into_edit()?;
        if let Some(assignee) = edit.new_assignee()
            && let Some(rejection) = self.check_assignee(task.team_id(), assignee).await?
        {
            return Ok(rejected(rejection, Some(task_id)));
        }

        let moves_column = edit
            .status
            .is_some_and(|status| status != task.status());
        let placement = match (moves_column, edit.has_position()) {
            (true, false) => ColumnPlacement::Append,
            (true, true) => ColumnPlacement::AsGiven,
            (false, true) => ColumnPlacement::Reposition,
            (false, false) => ColumnPlacement::Keep,
        };
        let tag_write = if edit.replaces_tags() {
            TagWrite::Replace
        } else {
            TagWrite::Keep
        };

        let status_change = task.apply_edit(edit, &*self.clock);
        let stored = self.persist(&task, placement, tag_write).await?;
        info!(
            %task_id,
            column = %stored.column(),
            position = %stored.position(),
            status_changed_to = ?status_change.changed_to(),
            "task updated"
        );
        Ok(Outcome::Applied(TaskChange {
            view: self.render_one(stored).await?,
            status_change,
        }))
    }

    /// Moves a task to `position` in the `status` column, shifting the
    /// siblings at or after that position down by one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] for an unknown task and
    /// [`TaskBoardError::Repository`] when the store fails.
    pub async fn move_task(
        &self,
        team_id: TeamId,
        task_id: TaskId,
        status: TaskStatus,
        position: Position,
    ) -> TaskBoardResult<Outcome<TaskChange>> {
        debug!(%team_id, %task_id, %status, %position, "moving task");
        let mut task = self.load(task_id).await?;
        if !task.belongs_to(team_id) {
            return Ok(rejected(
                Rejection::CrossTeam(BoardAction::Move),
                Some(task_id),
            ));
        }

        let status_change = task.move_to(status, position, &*self.clock);
        let stored = self
            .persist(&task, ColumnPlacement::InsertAt, TagWrite::Keep)
            .await?;
        info!(
            %task_id,
            column = %stored.column(),
            position = %stored.position(),
            status_changed_to = ?status_change.changed_to(),
            "task moved"
        );
        Ok(Outcome::Applied(TaskChange {
            view: self.render_one(stored).await?,
            status_change,
        }))
    }

    /// Sets or clears a task's assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] for an unknown task and
    /// [`TaskBoardError::Repository`] or [`TaskBoardError::Directory`] when
    /// a lookup or write fails.
    pub async fn assign(
        &self,
        team_id: TeamId,
        task_id: TaskId,
        assignee: Option<UserId>,
    ) -> TaskBoardResult<Outcome<TaskView>> {
        debug!(%team_id, %task_id, ?assignee, "assigning task");
        let mut task = self.load(task_id).await?;
        if !task.belongs_to(team_id) {
            return Ok(rejected(
                Rejection::CrossTeam(BoardAction::Assign),
                Some(task_id),
            ));
        }
        if let Some(user_id) = assignee
            && let Some(rejection) = self.check_assignee(task.team_id(), user_id).await?
        {
            return Ok(rejected(rejection, Some(task_id)));
        }

        task.assign(assignee, &*self.clock);
        let stored = self
            .persist(&task, ColumnPlacement::Keep, TagWrite::Keep)
            .await?;
        info!(%task_id, ?assignee, "task assignment updated");
        Ok(Outcome::Applied(self.render_one(stored).await?))
    }

    /// Hard-deletes a task and its tags. The column is not renumbered.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] for an unknown task and
    /// [`TaskBoardError::Repository`] when the store fails.
    pub async fn delete(&self, team_id: TeamId, task_id: TaskId) -> TaskBoardResult<Outcome<()>> {
        debug!(%team_id, %task_id, "deleting task");
        let task = self.load(task_id).await?;
        if !task.belongs_to(team_id) {
            return Ok(rejected(
                Rejection::CrossTeam(BoardAction::Delete),
                Some(task_id),
            ));
        }

        if !self.repository.delete(task_id).await? {
            return Err(TaskBoardError::TaskNotFound(task_id));
        }
        info!(%task_id, column = %task.column(), "task deleted");
        Ok(Outcome::Applied(()))
    }

    async fn load(&self, task_id: TaskId) -> TaskBoardResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskBoardError::TaskNotFound(task_id))
    }

    async fn persist(
        &self,
        task: &Task,
        placement: ColumnPlacement,
        tags: TagWrite,
    ) -> TaskBoardResult<Task> {
        self.repository
            .save(task, placement, tags)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(id) => TaskBoardError::TaskNotFound(id),
                other => TaskBoardError::Repository(other),
            })
    }

    async fn check_assignee(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> TaskBoardResult<Option<Rejection>> {
        let member = self.directory.find_member(user_id).await?;
        if member.is_some_and(|found| found.is_in_team(team_id)) {
            Ok(None)
        } else {
            Ok(Some(Rejection::AssigneeNotInTeam(user_id)))
        }
    }

    async fn render_one(&self, task: Task) -> TaskBoardResult<TaskView> {
        self.render(task, &mut SummaryCache::new()).await
    }

    async fn render(&self, task: Task, summaries: &mut SummaryCache) -> TaskBoardResult<TaskView> {
        let assignee = match task.assigned_to() {
            Some(user_id) => self.summary_of(user_id, summaries).await?,
            None => None,
        };
        let creator = self.summary_of(task.created_by(), summaries).await?;
        Ok(TaskView {
            task,
            assignee,
            creator,
        })
    }

    async fn summary_of(
        &self,
        user_id: UserId,
        summaries: &mut SummaryCache,
    ) -> TaskBoardResult<Option<MemberSummary>> {
        if let Some(cached) = summaries.get(&user_id) {
            return Ok(cached.clone());
        }
        let summary = self
            .directory
            .find_member(user_id)
            .await?
            .map(|member| member.summary());
        summaries.insert(user_id, summary.clone());
        Ok(summary)
    }
}

fn rejected<T>(rejection: Rejection, task_id: Option<TaskId>) -> Outcome<T> {
    warn!(?task_id, code = rejection.code(), %rejection, "board operation rejected");
    Outcome::Rejected(rejection)
}
