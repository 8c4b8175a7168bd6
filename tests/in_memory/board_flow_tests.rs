//! End-to-end board flows rendered through the response envelopes.

use super::helpers::{TeamBoard, team_board};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use serde_json::json;
use taskboard::task::{
    api::{assign_envelope, delete_envelope, list_envelope, move_envelope, update_envelope},
    domain::{Position, TagInput, TaskStatus},
    services::{AssigneeFilter, TaskListFilter, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_travels_across_the_board(team_board: TeamBoard) -> eyre::Result<()> {
    let created = team_board.create("Prepare demo", TaskStatus::Todo).await?;
    let task_id = created.task.id();

    let started = serde_json::to_value(move_envelope(
        team_board
            .service
            .move_task(team_board.team, task_id, TaskStatus::InProgress, Position::FIRST)
            .await?,
    ))?;
    ensure!(started["success"] == json!(true));
    ensure!(started["status_changed_to"] == json!("in_progress"));
    ensure!(started["task"]["completed_at"].is_null());

    let assigned = serde_json::to_value(assign_envelope(
        team_board
            .service
            .assign(team_board.team, task_id, Some(team_board.engineer))
            .await?,
    ))?;
    ensure!(assigned["task"]["assigned_user"]["name"] == json!("Eli"));

    let finished = serde_json::to_value(update_envelope(
        team_board
            .service
            .update(
                team_board.team,
                task_id,
                UpdateTaskRequest::new()
                    .with_status(TaskStatus::Done)
                    .with_tags(vec![TagInput::named("shipped")]),
            )
            .await?,
    ))?;
    ensure!(finished["status_changed_to"] == json!("done"));
    ensure!(finished["task"]["completed_at"].is_string());
    ensure!(finished["task"]["tags"] == json!([{"name": "shipped", "color": "#0ea5e9"}]));

    let retitled = serde_json::to_value(update_envelope(
        team_board
            .service
            .update(
                team_board.team,
                task_id,
                UpdateTaskRequest::new()
                    .with_title("Prepare demo day")
                    .with_status(TaskStatus::Done),
            )
            .await?,
    ))?;
    ensure!(retitled["status_changed_to"].is_null());
    ensure!(retitled["task"]["completed_at"] == finished["task"]["completed_at"]);
    ensure!(retitled["task"]["tags"] == finished["task"]["tags"]);

    let deleted = serde_json::to_value(delete_envelope(
        team_board.service.delete(team_board.team, task_id).await?,
    ))?;
    ensure!(deleted["message"] == json!("Task deleted with a smooth goodbye."));
    ensure!(
        team_board
            .service
            .list(team_board.team, team_board.lead, TaskListFilter::new())
            .await?
            .is_empty()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigned_to_me_lists_only_the_callers_tasks(team_board: TeamBoard) -> eyre::Result<()> {
    let mine = team_board.create("Review PR", TaskStatus::InProgress).await?;
    team_board.create("Unowned", TaskStatus::Todo).await?;
    let outcome = team_board
        .service
        .assign(team_board.team, mine.task.id(), Some(team_board.engineer))
        .await?;
    ensure!(outcome.is_applied());

    let filter = TaskListFilter::new().assigned(AssigneeFilter::try_from("me")?);
    let body = serde_json::to_value(list_envelope(
        team_board
            .service
            .list(team_board.team, team_board.engineer, filter)
            .await?,
    ))?;

    let tasks = body["tasks"].as_array().ok_or_eyre("tasks must be an array")?;
    ensure!(tasks.len() == 1);
    ensure!(body["tasks"][0]["title"] == json!("Review PR"));
    Ok(())
}

#[rstest]
#[case("", AssigneeFilter::Anyone)]
#[case("self", AssigneeFilter::Caller)]
#[case(" me ", AssigneeFilter::Caller)]
fn assignee_filter_parses_keywords(#[case] raw: &str, #[case] expected: AssigneeFilter) {
    assert_eq!(AssigneeFilter::try_from(raw).ok(), Some(expected));
}

#[rstest]
fn assignee_filter_rejects_malformed_ids() {
    assert!(AssigneeFilter::try_from("not-a-uuid").is_err());
}
