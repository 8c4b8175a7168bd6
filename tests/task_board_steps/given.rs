//! Given steps for task board BDD scenarios.

use super::world::{BoardWorld, parse_status, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::{
    domain::{TagInput, TaskPriority, TaskStatus, TeamId, TeamMember, UserId},
    services::CreateTaskRequest,
};

fn create_task(
    world: &mut BoardWorld,
    request: CreateTaskRequest,
    title: String,
) -> Result<(), eyre::Report> {
    let view = run_async(world.service.create(request))
        .wrap_err("create task for board scenario")?
        .applied()
        .ok_or_else(|| eyre::eyre!("creating {title} was rejected"))?;
    world.tasks.insert(title, view.task.id());
    Ok(())
}

#[given("a team board")]
fn team_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world
        .directory
        .add_member(TeamMember::new(
            world.member,
            world.team,
            "Scenario member",
            "member@example.com",
        ))
        .wrap_err("register scenario member")?;
    Ok(())
}

#[given(r#"the "{status}" column holds {count:u32} tasks"#)]
fn column_holds(world: &mut BoardWorld, status: String, count: u32) -> Result<(), eyre::Report> {
    let column = parse_status(&status)?;
    for index in 1..=count {
        let title = format!("{status}-{index}");
        let request = CreateTaskRequest::new(
            world.team,
            world.member,
            title.clone(),
            column,
            TaskPriority::Medium,
        );
        create_task(world, request, title)?;
    }
    Ok(())
}

#[given(r#"a task "{title}" in "{status}""#)]
fn task_in(world: &mut BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(
        world.team,
        world.member,
        title.clone(),
        parse_status(&status)?,
        TaskPriority::Medium,
    );
    create_task(world, request, title)
}

#[given(r#"a task "{title}" owned by another team"#)]
fn foreign_task(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let other_team = TeamId::new();
    let other_member = UserId::new();
    world
        .directory
        .add_member(TeamMember::new(
            other_member,
            other_team,
            "Foreign member",
            "foreign@example.com",
        ))
        .wrap_err("register foreign member")?;
    let request = CreateTaskRequest::new(
        other_team,
        other_member,
        title.clone(),
        TaskStatus::Todo,
        TaskPriority::Low,
    );
    create_task(world, request, title)
}

#[given(r#"a task "{title}" tagged "{tags}""#)]
fn tagged_task(world: &mut BoardWorld, title: String, tags: String) -> Result<(), eyre::Report> {
    let inputs: Vec<TagInput> = tags.split(',').map(str::trim).map(TagInput::named).collect();
    let request = CreateTaskRequest::new(
        world.team,
        world.member,
        title.clone(),
        TaskStatus::Todo,
        TaskPriority::Medium,
    )
    .with_tags(inputs);
    create_task(world, request, title)
}
