//! Shared fixtures for in-memory board integration tests.

use std::collections::HashSet;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::{InMemoryTaskRepository, InMemoryTeamDirectory},
    domain::{Position, TaskPriority, TaskStatus, TeamId, TeamMember, UserId},
    ports::{TaskQuery, TaskRepository},
    services::{CreateTaskRequest, TaskBoardService, TaskView},
};

/// Board service over the in-memory adapters.
pub type BoardService =
    TaskBoardService<InMemoryTaskRepository, InMemoryTeamDirectory, DefaultClock>;

/// A team of two over fresh in-memory stores.
pub struct TeamBoard {
    pub service: Arc<BoardService>,
    pub repository: Arc<InMemoryTaskRepository>,
    pub team: TeamId,
    pub lead: UserId,
    pub engineer: UserId,
}

/// Fixture that creates a fresh team board.
#[fixture]
pub fn team_board() -> TeamBoard {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let directory = Arc::new(InMemoryTeamDirectory::new());
    let team = TeamId::new();
    let lead = UserId::new();
    let engineer = UserId::new();
    directory
        .add_member(TeamMember::new(lead, team, "Lena", "lena@example.com"))
        .expect("unique member");
    directory
        .add_member(TeamMember::new(engineer, team, "Eli", "eli@example.com"))
        .expect("unique member");

    TeamBoard {
        service: Arc::new(TaskBoardService::new(
            Arc::clone(&repository),
            directory,
            Arc::new(DefaultClock),
        )),
        repository,
        team,
        lead,
        engineer,
    }
}

impl TeamBoard {
    /// Creates a task created by the lead.
    ///
    /// # Errors
    ///
    /// Returns an error when the service fails or rejects the request.
    pub async fn create(&self, title: &str, status: TaskStatus) -> eyre::Result<TaskView> {
        let request =
            CreateTaskRequest::new(self.team, self.lead, title, status, TaskPriority::Medium);
        self.service
            .create(request)
            .await?
            .applied()
            .ok_or_else(|| eyre::eyre!("creating {title} was rejected"))
    }

    /// Returns the positions of one column.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn positions(&self, status: TaskStatus) -> eyre::Result<Vec<Position>> {
        let tasks = self
            .repository
            .list(&TaskQuery::for_team(self.team))
            .await?;
        Ok(tasks
            .iter()
            .filter(|task| task.status() == status)
            .map(|task| task.position())
            .collect())
    }
}

/// Asserts that a column holds no duplicate positions.
///
/// # Errors
///
/// Returns an error naming the first duplicate.
pub fn ensure_unique(positions: &[Position]) -> eyre::Result<()> {
    let mut seen = HashSet::new();
    for position in positions {
        eyre::ensure!(seen.insert(*position), "duplicate position {position}");
    }
    Ok(())
}
