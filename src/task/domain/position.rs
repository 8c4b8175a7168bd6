//! Column positions and the allocator that keeps them unique.
//!
//! A column is the set of tasks sharing one `(team, status)` pair. Positions
//! order a column; gaps are allowed, duplicates are not. Two placement
//! strategies exist:
//!
//! - append: the new task lands after the current maximum (`1` for an empty
//!   column);
//! - insert-at: every sibling at or after the target is shifted up by one
//!   before the mover takes the target slot.
//!
//! Deleting a task never renumbers its column.

use super::{TaskDomainError, TaskId, TaskStatus, TeamId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One-based ordering key within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u32);

impl Position {
    /// Top slot of a column.
    pub const FIRST: Self = Self(1);

    /// Bottom-most slot a column can hold; positions are stored as `INTEGER`.
    pub const MAX: Self = Self(i32::MAX.unsigned_abs());

    /// Creates a validated position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPosition`] for zero or a value
    /// above [`Position::MAX`].
    pub fn new(value: u32) -> Result<Self, TaskDomainError> {
        if value == 0 || value > Self::MAX.0 {
            return Err(TaskDomainError::InvalidPosition(i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the slot directly below this one, or `None` at
    /// [`Position::MAX`].
    #[must_use]
    pub const fn shifted(self) -> Option<Self> {
        if self.0 >= Self::MAX.0 {
            return None;
        }
        Some(Self(self.0 + 1))
    }

    /// Returns the append slot for a column whose highest position is `max`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ColumnFull`] when `max` is
    /// [`Position::MAX`].
    pub const fn after(max: Option<Self>) -> Result<Self, TaskDomainError> {
        match max {
            Some(position) => match position.shifted() {
                Some(next) => Ok(next),
                None => Err(TaskDomainError::ColumnFull),
            },
            None => Ok(Self::FIRST),
        }
    }

    /// Returns `true` when a task at this position must make room for a
    /// task inserted at `target`.
    #[must_use]
    pub const fn is_displaced_by(self, target: Self) -> bool {
        self.0 >= target.0
    }
}

impl TryFrom<i64> for Position {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .filter(|raw| *raw > 0 && *raw <= Self::MAX.0)
            .map(Self)
            .ok_or(TaskDomainError::InvalidPosition(value))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    team_id: TeamId,
    status: TaskStatus,
}

impl ColumnKey {
    /// Creates a column key.
    #[must_use]
    pub const fn new(team_id: TeamId, status: TaskStatus) -> Self {
        Self { team_id, status }
    }

    /// Returns the owning team.
    #[must_use]
    pub const fn team_id(self) -> TeamId {
        self.team_id
    }

    /// Returns the column status.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        self.status
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.team_id, self.status)
    }
}

/// Pure position arithmetic shared by the task store adapters.
///
/// Callers must hold whatever lock serialises the column while they apply
/// the results.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionAllocator;

impl PositionAllocator {
    /// Returns the append slot for a column holding `positions`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ColumnFull`] when the column already
    /// reaches [`Position::MAX`].
    pub fn append(
        positions: impl IntoIterator<Item = Position>,
    ) -> Result<Position, TaskDomainError> {
        Position::after(positions.into_iter().max())
    }

    /// Returns the new positions of the siblings displaced when `mover`
    /// is inserted at `target`.
    ///
    /// The mover itself is never part of the plan, so a task moving within
    /// its own column does not collide with its old slot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ColumnFull`] when a displaced sibling
    /// already sits at [`Position::MAX`].
    pub fn insert_at(
        column: impl IntoIterator<Item = (TaskId, Position)>,
        mover: TaskId,
        target: Position,
    ) -> Result<Vec<(TaskId, Position)>, TaskDomainError> {
        column
            .into_iter()
            .filter(|(id, position)| *id != mover && position.is_displaced_by(target))
            .map(|(id, position)| {
                position
                    .shifted()
                    .map(|next| (id, next))
                    .ok_or(TaskDomainError::ColumnFull)
            })
            .collect()
    }
}
