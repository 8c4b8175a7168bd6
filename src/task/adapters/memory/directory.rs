//! In-memory team directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{TeamId, TeamMember, UserId},
    ports::{TeamDirectory, TeamDirectoryError, TeamDirectoryResult},
};

/// Thread-safe in-memory team directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamDirectory {
    members: Arc<RwLock<HashMap<UserId, TeamMember>>>,
}

impl InMemoryTeamDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a member.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDirectoryError::DuplicateMember`] when the user is
    /// already registered.
    pub fn add_member(&self, member: TeamMember) -> TeamDirectoryResult<()> {
        let mut members = self.members.write().map_err(lock_error)?;
        if members.contains_key(&member.id()) {
            return Err(TeamDirectoryError::DuplicateMember(member.id()));
        }
        members.insert(member.id(), member);
        Ok(())
    }
}

fn lock_error(err: impl std::fmt::Display) -> TeamDirectoryError {
    TeamDirectoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TeamDirectory for InMemoryTeamDirectory {
    async fn find_member(&self, user_id: UserId) -> TeamDirectoryResult<Option<TeamMember>> {
        let members = self.members.read().map_err(lock_error)?;
        Ok(members.get(&user_id).cloned())
    }

    async fn list_members(&self, team_id: TeamId) -> TeamDirectoryResult<Vec<TeamMember>> {
        let members = self.members.read().map_err(lock_error)?;
        let mut team: Vec<TeamMember> = members
            .values()
            .filter(|member| member.is_in_team(team_id))
            .cloned()
            .collect();
        team.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(team)
    }
}
