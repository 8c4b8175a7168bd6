//! Non-fatal results of board operations.
//!
//! A rejection is an expected answer to a request (the caller may not touch
//! the task, or the assignee is outside the team). It is returned as a value
//! so callers can render it without treating it as a failure.

use crate::task::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result of a board operation that may be refused.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation ran and produced `T`.
    Applied(T),
    /// The operation was refused without mutating anything.
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    /// Returns `true` when the operation ran.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Returns the rejection, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }

    /// Returns the applied value, discarding a rejection.
    #[must_use]
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    /// Maps the applied value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Applied(value) => Outcome::Applied(f(value)),
            Self::Rejected(rejection) => Outcome::Rejected(rejection),
        }
    }
}

/// Board operation named in cross-team rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardAction {
    /// Partial update.
    Update,
    /// Column move.
    Move,
    /// Assignment change.
    Assign,
    /// Deletion.
    Delete,
}

impl BoardAction {
    /// Returns the verb used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Move => "move",
            Self::Assign => "assign",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for BoardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a board operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The task belongs to a team other than the caller's.
    #[error("You cannot {0} tasks from another team.")]
    CrossTeam(BoardAction),
    /// The requested assignee is unknown or in another team.
    #[error("User must belong to the same team.")]
    AssigneeNotInTeam(UserId),
}

impl Rejection {
    /// Returns a stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CrossTeam(_) => "cross-team",
            Self::AssigneeNotInTeam(_) => "assignee-not-in-team",
        }
    }
}
