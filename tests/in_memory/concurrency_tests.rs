//! Concurrent placement tests over the in-memory adapters.

use std::sync::Arc;

use super::helpers::{TeamBoard, ensure_unique, team_board};
use eyre::ensure;
use rstest::rstest;
use taskboard::task::domain::{Position, TaskPriority, TaskStatus};
use taskboard::task::services::CreateTaskRequest;
use tokio::task::JoinSet;

const CALLERS: u32 = 24;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_positions(team_board: TeamBoard) -> eyre::Result<()> {
    let mut creators = JoinSet::new();
    for index in 0..CALLERS {
        let service = Arc::clone(&team_board.service);
        let request = CreateTaskRequest::new(
            team_board.team,
            team_board.engineer,
            format!("parallel {index}"),
            TaskStatus::Todo,
            TaskPriority::Low,
        );
        creators.spawn(async move { service.create(request).await });
    }
    while let Some(joined) = creators.join_next().await {
        ensure!(joined??.is_applied());
    }

    let mut positions = team_board.positions(TaskStatus::Todo).await?;
    ensure_unique(&positions)?;
    positions.sort();
    let expected: Vec<Position> = (1..=CALLERS)
        .map(Position::new)
        .collect::<Result<_, _>>()?;
    ensure!(positions == expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_moves_into_one_column_never_collide(
    team_board: TeamBoard,
) -> eyre::Result<()> {
    let mut ids = Vec::new();
    for index in 0..12 {
        ids.push(
            team_board
                .create(&format!("backlog {index}"), TaskStatus::Todo)
                .await?
                .task
                .id(),
        );
    }
    team_board.create("already done", TaskStatus::Done).await?;

    let mut movers = JoinSet::new();
    for (slot, task_id) in (1_u32..=3).cycle().zip(ids) {
        let service = Arc::clone(&team_board.service);
        let team = team_board.team;
        let target = Position::new(slot)?;
        movers.spawn(async move {
            service
                .move_task(team, task_id, TaskStatus::Done, target)
                .await
        });
    }
    while let Some(joined) = movers.join_next().await {
        ensure!(joined??.is_applied());
    }

    let done = team_board.positions(TaskStatus::Done).await?;
    ensure!(done.len() == 13);
    ensure_unique(&done)?;
    ensure!(team_board.positions(TaskStatus::Todo).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn creates_racing_moves_keep_the_column_unique(team_board: TeamBoard) -> eyre::Result<()> {
    let mut seeded = Vec::new();
    for index in 0..8 {
        seeded.push(
            team_board
                .create(&format!("seed {index}"), TaskStatus::InProgress)
                .await?
                .task
                .id(),
        );
    }

    let mut workers = JoinSet::new();
    for (index, task_id) in seeded.into_iter().enumerate() {
        let service = Arc::clone(&team_board.service);
        let team = team_board.team;
        let creator = team_board.lead;
        workers.spawn(async move {
            let request = CreateTaskRequest::new(
                team,
                creator,
                format!("late {index}"),
                TaskStatus::Todo,
                TaskPriority::High,
            );
            let created = service.create(request).await?.is_applied();
            let moved = service
                .move_task(team, task_id, TaskStatus::Todo, Position::FIRST)
                .await?
                .is_applied();
            Ok::<_, taskboard::task::services::TaskBoardError>(created && moved)
        });
    }
    while let Some(joined) = workers.join_next().await {
        ensure!(joined??);
    }

    let todo = team_board.positions(TaskStatus::Todo).await?;
    ensure!(todo.len() == 16);
    ensure_unique(&todo)?;
    Ok(())
}
