//! Bundled schema for the task board tables.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::result::QueryResult;

/// Idempotent DDL creating the `teams`, `users`, `tasks` and `task_tags`
/// tables.
pub const TASK_BOARD_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_task_board/up.sql");

/// Applies [`TASK_BOARD_SCHEMA_SQL`] on the given connection.
///
/// # Errors
///
/// Returns the Diesel error raised by the database.
pub fn apply_schema(connection: &mut PgConnection) -> QueryResult<()> {
    connection.batch_execute(TASK_BOARD_SCHEMA_SQL)
}
