//! `PostgreSQL` team directory backed by the `users` table.

use super::{models::MemberRow, repository::TaskPgPool, schema::users};
use crate::task::{
    domain::{TeamId, TeamMember, UserId},
    ports::{TeamDirectory, TeamDirectoryError, TeamDirectoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed team directory.
#[derive(Debug, Clone)]
pub struct PostgresTeamDirectory {
    pool: TaskPgPool,
}

impl PostgresTeamDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, operation: F) -> TeamDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TeamDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TeamDirectoryError::persistence)?;
            operation(&mut connection)
        })
        .await
        .map_err(TeamDirectoryError::persistence)?
    }
}

#[async_trait]
impl TeamDirectory for PostgresTeamDirectory {
    async fn find_member(&self, user_id: UserId) -> TeamDirectoryResult<Option<TeamMember>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(user_id.into_inner())
                .select(MemberRow::as_select())
                .first::<MemberRow>(connection)
                .optional()
                .map_err(TeamDirectoryError::persistence)?;
            Ok(row.map(row_to_member))
        })
        .await
    }

    async fn list_members(&self, team_id: TeamId) -> TeamDirectoryResult<Vec<TeamMember>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::team_id.eq(team_id.into_inner()))
                .order(users::name.asc())
                .select(MemberRow::as_select())
                .load::<MemberRow>(connection)
                .map_err(TeamDirectoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_member).collect())
        })
        .await
    }
}

fn row_to_member(row: MemberRow) -> TeamMember {
    let mut member = TeamMember::new(
        UserId::from_uuid(row.id),
        TeamId::from_uuid(row.team_id),
        row.name,
        row.email,
    );
    if let Some(avatar_color) = row.avatar_color {
        member = member.with_avatar_color(avatar_color);
    }
    member
}
