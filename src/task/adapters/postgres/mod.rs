//! `PostgreSQL` adapters for task board persistence.

mod directory;
mod migrations;
mod models;
mod repository;
mod schema;

pub use directory::PostgresTeamDirectory;
pub use migrations::{TASK_BOARD_SCHEMA_SQL, apply_schema};
pub use repository::{PostgresTaskRepository, TaskPgPool};
