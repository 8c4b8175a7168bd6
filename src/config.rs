//! Runtime configuration loaded from the environment.
//!
//! An optional `.env` file is read first; variables already present in the
//! process environment take precedence over it.

use crate::task::adapters::postgres::TaskPgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// Database connection string (required).
pub const DATABASE_URL_VAR: &str = "TASKBOARD_DATABASE_URL";
/// Maximum number of pooled connections.
pub const POOL_SIZE_VAR: &str = "TASKBOARD_POOL_SIZE";
/// `tracing` filter directive.
pub const LOG_VAR: &str = "TASKBOARD_LOG";

/// Pool size used when [`POOL_SIZE_VAR`] is unset.
pub const DEFAULT_POOL_SIZE: u32 = 8;
/// Log filter used when [`LOG_VAR`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is missing or blank.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    /// The pool size is not a positive integer.
    #[error("invalid value {value:?} for {name}: expected a positive integer")]
    InvalidPoolSize {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
    /// The `.env` file exists but could not be read.
    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
    /// The connection pool could not be created.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Task board runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    database_url: String,
    pool_size: u32,
    log_filter: String,
}

impl BoardConfig {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `.env` is unreadable or a variable is
    /// missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            return Err(err.into());
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] without a database URL and
    /// [`ConfigError::InvalidPoolSize`] for a malformed pool size.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let pool_size = lookup(POOL_SIZE_VAR)
            .map(|raw| parse_pool_size(&raw))
            .transpose()?
            .unwrap_or(DEFAULT_POOL_SIZE);
        let log_filter = lookup(LOG_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            database_url,
            pool_size,
            log_filter,
        })
    }

    /// Returns the database connection string.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns the `tracing` filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| ConfigError::InvalidPoolSize {
            name: POOL_SIZE_VAR,
            value: raw.to_owned(),
        })
}

/// Builds the r2d2 connection pool described by `config`.
///
/// # Errors
///
/// Returns [`ConfigError::Pool`] when no connection can be established.
pub fn build_pool(config: &BoardConfig) -> Result<TaskPgPool, ConfigError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url());
    Ok(Pool::builder()
        .max_size(config.pool_size())
        .build(manager)?)
}
