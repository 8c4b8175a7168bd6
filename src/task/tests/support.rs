//! Shared fixtures for board service tests.

use std::sync::Arc;

use crate::task::{
    adapters::memory::{InMemoryTaskRepository, InMemoryTeamDirectory},
    domain::{Position, TaskId, TaskPriority, TaskStatus, TeamId, TeamMember, UserId},
    ports::{TaskQuery, TaskRepository},
    services::{CreateTaskRequest, TaskBoardService, TaskView},
};
use eyre::eyre;
use mockable::DefaultClock;
use rstest::fixture;

pub(super) type TestService =
    TaskBoardService<InMemoryTaskRepository, InMemoryTeamDirectory, DefaultClock>;

/// Two teams with two members each, over empty in-memory stores.
pub(super) struct Board {
    pub(super) service: TestService,
    pub(super) repository: Arc<InMemoryTaskRepository>,
    pub(super) team: TeamId,
    pub(super) other_team: TeamId,
    pub(super) alice: UserId,
    pub(super) bob: UserId,
    pub(super) outsider: UserId,
}

#[fixture]
pub(super) fn board() -> Board {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let directory = Arc::new(InMemoryTeamDirectory::new());
    let team = TeamId::new();
    let other_team = TeamId::new();
    let alice = UserId::new();
    let bob = UserId::new();
    let outsider = UserId::new();
    let carol = UserId::new();

    for member in [
        TeamMember::new(alice, team, "Alice", "alice@example.com").with_avatar_color("#f97316"),
        TeamMember::new(bob, team, "Bob", "bob@example.com"),
        TeamMember::new(outsider, other_team, "Oscar", "oscar@example.com"),
        TeamMember::new(carol, other_team, "Carol", "carol@example.com"),
    ] {
        directory
            .add_member(member)
            .expect("fixture members should be unique");
    }

    Board {
        service: TaskBoardService::new(
            Arc::clone(&repository),
            directory,
            Arc::new(DefaultClock),
        ),
        repository,
        team,
        other_team,
        alice,
        bob,
        outsider,
    }
}

impl Board {
    /// Creates a medium-priority task owned by Alice.
    pub(super) async fn create(&self, title: &str, status: TaskStatus) -> eyre::Result<TaskView> {
        self.create_in(self.team, self.alice, title, status).await
    }

    /// Creates a medium-priority task in `team` on behalf of `creator`.
    pub(super) async fn create_in(
        &self,
        team: TeamId,
        creator: UserId,
        title: &str,
        status: TaskStatus,
    ) -> eyre::Result<TaskView> {
        let request = CreateTaskRequest::new(team, creator, title, status, TaskPriority::Medium);
        self.service
            .create(request)
            .await?
            .applied()
            .ok_or_else(|| eyre!("creating {title} was rejected"))
    }

    /// Returns `(title, position)` pairs of one column in board order.
    pub(super) async fn column(&self, status: TaskStatus) -> eyre::Result<Vec<(String, u32)>> {
        let tasks = self
            .repository
            .list(&TaskQuery::for_team(self.team))
            .await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.status() == status)
            .map(|task| (task.title().as_str().to_owned(), task.position().value()))
            .collect())
    }

    /// Returns the stored position of a task.
    pub(super) async fn position_of(&self, task_id: TaskId) -> eyre::Result<Position> {
        let task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| eyre!("task {task_id} is missing"))?;
        Ok(task.position())
    }
}

/// Builds a position from a literal.
pub(super) fn pos(value: u32) -> Position {
    Position::new(value).expect("test positions are positive")
}
