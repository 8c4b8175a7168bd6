//! Applies the task board schema to the configured database.
//!
//! Usage:
//!
//! ```text
//! TASKBOARD_DATABASE_URL=postgres://localhost/board taskboard-schema
//! ```
//!
//! The DDL is idempotent, so running the command against an initialised
//! database is a no-op.

use taskboard::config::{BoardConfig, build_pool};
use taskboard::task::adapters::postgres::apply_schema;
use taskboard::telemetry::init_tracing;
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    let config = BoardConfig::from_env()?;
    init_tracing(config.log_filter())?;

    let pool = build_pool(&config)?;
    let mut connection = pool.get()?;
    apply_schema(&mut connection)?;
    info!(pool_size = config.pool_size(), "task board schema applied");
    Ok(())
}
