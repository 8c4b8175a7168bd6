//! Team membership as seen by the task board.

use super::{TeamId, UserId};
use serde::{Deserialize, Serialize};

/// A user belonging to exactly one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    id: UserId,
    team_id: TeamId,
    name: String,
    email: String,
    avatar_color: Option<String>,
}

impl TeamMember {
    /// Creates a team member record.
    #[must_use]
    pub fn new(
        id: UserId,
        team_id: TeamId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            team_id,
            name: name.into(),
            email: email.into(),
            avatar_color: None,
        }
    }

    /// Sets the avatar color shown next to the member's name.
    #[must_use]
    pub fn with_avatar_color(mut self, avatar_color: impl Into<String>) -> Self {
        self.avatar_color = Some(avatar_color.into());
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the member's team.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the avatar color, if any.
    #[must_use]
    pub fn avatar_color(&self) -> Option<&str> {
        self.avatar_color.as_deref()
    }

    /// Returns `true` when the member belongs to `team_id`.
    #[must_use]
    pub fn is_in_team(&self, team_id: TeamId) -> bool {
        self.team_id == team_id
    }

    /// Returns the summary rendered alongside tasks.
    #[must_use]
    pub fn summary(&self) -> MemberSummary {
        MemberSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar_color: self.avatar_color.clone(),
        }
    }
}

/// Assignee or creator summary attached to rendered tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar color, if any.
    pub avatar_color: Option<String>,
}
