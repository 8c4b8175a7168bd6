//! Then steps for task board BDD scenarios.

use super::world::{BoardWorld, parse_status, run_async};
use rstest_bdd_macros::then;
use taskboard::task::ports::{TaskQuery, TaskRepository};

#[then(r#"the "{status}" column reads "{layout}""#)]
fn column_reads(world: &BoardWorld, status: String, layout: String) -> Result<(), eyre::Report> {
    let column = parse_status(&status)?;
    let tasks = run_async(world.repository.list(&TaskQuery::for_team(world.team)))?;
    let actual: Vec<String> = tasks
        .iter()
        .filter(|task| task.status() == column)
        .map(|task| format!("{}:{}", task.title(), task.position()))
        .collect();
    let expected: Vec<String> = layout.split(',').map(|entry| entry.trim().to_owned()).collect();

    eyre::ensure!(
        actual == expected,
        "expected column {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"the status change reported is "{status}""#)]
fn status_change_reported(world: &BoardWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let change = world
        .last_change
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing applied change"))?;

    eyre::ensure!(
        change.status_change.changed_to() == Some(expected),
        "expected status change to {expected}, found {:?}",
        change.status_change
    );
    Ok(())
}

#[then("no status change is reported")]
fn no_status_change(world: &BoardWorld) -> Result<(), eyre::Report> {
    let change = world
        .last_change
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing applied change"))?;

    eyre::ensure!(
        !change.status_change.is_changed(),
        "unexpected status change {:?}",
        change.status_change
    );
    Ok(())
}

#[then(r#"the task "{title}" has a completion timestamp"#)]
fn has_completion(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let completed_at = world
        .stored(&title)?
        .completed_at()
        .ok_or_else(|| eyre::eyre!("task {title} has no completion timestamp"))?;
    world.remembered_completion = Some(completed_at);
    Ok(())
}

#[then(r#"the completion timestamp of "{title}" is unchanged"#)]
fn completion_unchanged(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let current = world.stored(&title)?.completed_at();

    eyre::ensure!(
        current.is_some() && current == world.remembered_completion,
        "completion timestamp moved from {:?} to {current:?}",
        world.remembered_completion
    );
    Ok(())
}

#[then(r#"the task "{title}" has no completion timestamp"#)]
fn has_no_completion(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.stored(&title)?;

    eyre::ensure!(
        task.completed_at().is_none(),
        "task {title} is still marked completed"
    );
    Ok(())
}

#[then(r#"the move is rejected with "{message}""#)]
fn move_rejected(world: &BoardWorld, message: String) -> Result<(), eyre::Report> {
    let rejection = world
        .last_rejection
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected a rejection"))?;

    eyre::ensure!(
        rejection.to_string() == message,
        "expected rejection {message:?}, found {rejection}"
    );
    Ok(())
}

#[then(r#"the task "{title}" is still in "{status}" at position {position:u32}"#)]
fn still_in_place(
    world: &BoardWorld,
    title: String,
    status: String,
    position: u32,
) -> Result<(), eyre::Report> {
    let task = world.stored(&title)?;
    let expected_status = parse_status(&status)?;

    eyre::ensure!(
        task.status() == expected_status && task.position().value() == position,
        "task {title} is in {} at {}",
        task.status(),
        task.position()
    );
    Ok(())
}

#[then(r#"the task "{title}" has no tags"#)]
fn has_no_tags(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.stored(&title)?;

    eyre::ensure!(task.tags().is_empty(), "task {title} still has tags");
    Ok(())
}
