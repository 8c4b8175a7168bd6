//! Shared helpers for `PostgreSQL` integration tests.

use std::sync::{Arc, OnceLock};

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_types::{Text, Uuid as SqlUuid};
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::postgres::{PostgresTaskRepository, PostgresTeamDirectory, TaskPgPool, apply_schema},
    domain::{TeamId, UserId},
    services::TaskBoardService,
};

/// Environment variable naming the scratch database.
pub const TEST_DATABASE_URL_VAR: &str = "TASKBOARD_TEST_DATABASE_URL";

/// Board service over the `PostgreSQL` adapters.
pub type PgBoardService =
    TaskBoardService<PostgresTaskRepository, PostgresTeamDirectory, DefaultClock>;

/// A freshly seeded team in the scratch database.
pub struct PgBoard {
    pub repository: Arc<PostgresTaskRepository>,
    pub service: Arc<PgBoardService>,
    pub team: TeamId,
    pub owner: UserId,
    pub teammate: UserId,
    pub outsider: UserId,
}

static SCHEMA: OnceLock<Result<(), String>> = OnceLock::new();

fn ensure_schema(pool: &TaskPgPool) -> eyre::Result<()> {
    SCHEMA
        .get_or_init(|| {
            let mut connection = pool.get().map_err(|err| err.to_string())?;
            apply_schema(&mut connection).map_err(|err| err.to_string())
        })
        .clone()
        .map_err(|err| eyre::eyre!("schema setup failed: {err}"))
}

fn insert_team(connection: &mut PgConnection, team: TeamId) -> eyre::Result<()> {
    diesel::sql_query("INSERT INTO teams (id, name, slug) VALUES ($1, $2, $3)")
        .bind::<SqlUuid, _>(team.into_inner())
        .bind::<Text, _>("Integration team")
        .bind::<Text, _>(format!("team-{team}"))
        .execute(connection)?;
    Ok(())
}

fn insert_user(
    connection: &mut PgConnection,
    user: UserId,
    team: TeamId,
    name: &str,
) -> eyre::Result<()> {
    diesel::sql_query("INSERT INTO users (id, team_id, name, email) VALUES ($1, $2, $3, $4)")
        .bind::<SqlUuid, _>(user.into_inner())
        .bind::<SqlUuid, _>(team.into_inner())
        .bind::<Text, _>(name)
        .bind::<Text, _>(format!("{user}@example.com"))
        .execute(connection)?;
    Ok(())
}

/// Seeds two teams and returns a board for the first.
///
/// # Errors
///
/// Returns an error when the database is configured but unusable.
pub fn seed_board(url: &str) -> eyre::Result<PgBoard> {
    let pool = Pool::builder()
        .max_size(8)
        .build(ConnectionManager::<PgConnection>::new(url))?;
    ensure_schema(&pool)?;

    let team = TeamId::new();
    let other_team = TeamId::new();
    let owner = UserId::new();
    let teammate = UserId::new();
    let outsider = UserId::new();
    {
        let mut connection = pool.get()?;
        insert_team(&mut connection, team)?;
        insert_team(&mut connection, other_team)?;
        insert_user(&mut connection, owner, team, "Olive")?;
        insert_user(&mut connection, teammate, team, "Ada")?;
        insert_user(&mut connection, outsider, other_team, "Zed")?;
    }

    let repository = Arc::new(PostgresTaskRepository::new(pool.clone()));
    let directory = Arc::new(PostgresTeamDirectory::new(pool));
    let service = Arc::new(TaskBoardService::new(
        Arc::clone(&repository),
        directory,
        Arc::new(DefaultClock),
    ));

    Ok(PgBoard {
        repository,
        service,
        team,
        owner,
        teammate,
        outsider,
    })
}

/// Fixture yielding a seeded board, or `None` when the scratch database
/// variable is unset.
#[fixture]
pub fn pg_board() -> Option<PgBoard> {
    let url = std::env::var(TEST_DATABASE_URL_VAR).ok()?;
    Some(seed_board(&url).expect("scratch database should be usable"))
}
