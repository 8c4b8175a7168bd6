//! Error types for task board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing task board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the storage limit.
    #[error("task title exceeds {max} characters (got {actual})")]
    TitleTooLong {
        /// Maximum accepted character count.
        max: usize,
        /// Character count of the rejected title.
        actual: usize,
    },

    /// A tag name is missing or empty after trimming.
    #[error("tag name must not be empty")]
    EmptyTagName,

    /// A tag name exceeds the storage limit.
    #[error("tag name '{0}' exceeds 50 characters")]
    TagNameTooLong(String),

    /// A tag color exceeds the storage limit.
    #[error("tag color '{0}' exceeds 20 characters")]
    TagColorTooLong(String),

    /// Column positions start at one and stay within `INTEGER` range.
    #[error("invalid position {0}, expected an integer from 1 to 2147483647")]
    InvalidPosition(i64),

    /// A column has no slot left below its last task.
    #[error("column has no position left after 2147483647")]
    ColumnFull,
}

/// Error returned while parsing task statuses from persistence or the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence or the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
