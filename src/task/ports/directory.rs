//! Directory port for looking up team members.

use crate::task::domain::{TeamId, TeamMember, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for team directory operations.
pub type TeamDirectoryResult<T> = Result<T, TeamDirectoryError>;

/// Read-only view of users and their teams.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    /// Finds a member by user identifier.
    ///
    /// Returns `None` when no such user exists.
    async fn find_member(&self, user_id: UserId) -> TeamDirectoryResult<Option<TeamMember>>;

    /// Lists the members of a team ordered by name.
    async fn list_members(&self, team_id: TeamId) -> TeamDirectoryResult<Vec<TeamMember>>;
}

/// Errors returned by team directory implementations.
#[derive(Debug, Clone, Error)]
pub enum TeamDirectoryError {
    /// A member with the same identifier already exists.
    #[error("duplicate team member: {0}")]
    DuplicateMember(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TeamDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
