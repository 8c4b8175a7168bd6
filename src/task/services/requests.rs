//! Request payloads accepted by the board service.

use crate::task::domain::{
    Position, TagInput, TaskDomainError, TaskEdit, TaskPriority, TaskStatus, TaskTitle, TeamId,
    UserId, tags_for_replacement,
};
use uuid::Uuid;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) team_id: TeamId,
    pub(super) created_by: UserId,
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) status: TaskStatus,
    pub(super) priority: TaskPriority,
    pub(super) assigned_to: Option<UserId>,
    pub(super) tags: Vec<TagInput>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        team_id: TeamId,
        created_by: UserId,
        title: impl Into<String>,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> Self {
        Self {
            team_id,
            created_by,
            title: title.into(),
            description: None,
            status,
            priority,
            assigned_to: None,
            tags: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn assigned_to(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    /// Sets the initial tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagInput>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }
}

/// Partial update of a task; fields left unset are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<Option<String>>,
    priority: Option<TaskPriority>,
    status: Option<TaskStatus>,
    assigned_to: Option<Option<UserId>>,
    position: Option<Position>,
    tags: Option<Vec<TagInput>>,
}

impl UpdateTaskRequest {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the status.
    ///
    /// Without an explicit position the task is appended to the end of the
    /// new column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Assigns the task to `user_id`.
    #[must_use]
    pub const fn assigned_to(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(Some(user_id));
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub const fn unassigned(mut self) -> Self {
        self.assigned_to = Some(None);
        self
    }

    /// Writes a raw position; siblings are not shifted.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Replaces the whole tag list. An empty list removes every tag.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagInput>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Validates the patch into a domain edit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the title or a named tag is invalid.
    pub fn into_edit(self) -> Result<TaskEdit, TaskDomainError> {
        Ok(TaskEdit {
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self.description,
            priority: self.priority,
            status: self.status,
            assigned_to: self.assigned_to,
            position: self.position,
            tags: self.tags.map(tags_for_replacement).transpose()?,
        })
    }
}

/// Assignee restriction applied when listing a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssigneeFilter {
    /// Tasks assigned to anyone, or to no one.
    #[default]
    Anyone,
    /// Tasks assigned to the calling member.
    Caller,
    /// Tasks assigned to a specific member.
    User(UserId),
}

impl AssigneeFilter {
    /// Resolves the filter against the calling member.
    #[must_use]
    pub const fn resolve(self, caller: UserId) -> Option<UserId> {
        match self {
            Self::Anyone => None,
            Self::Caller => Some(caller),
            Self::User(user_id) => Some(user_id),
        }
    }
}

impl TryFrom<&str> for AssigneeFilter {
    type Error = uuid::Error;

    /// Parses a query parameter: blank means anyone, `self` or `me` the
    /// caller, anything else a user identifier.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "" => Ok(Self::Anyone),
            "self" | "me" => Ok(Self::Caller),
            raw => Uuid::parse_str(raw).map(|uuid| Self::User(UserId::from_uuid(uuid))),
        }
    }
}

/// Filters for listing a team's board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListFilter {
    /// Assignee restriction.
    pub assignee: AssigneeFilter,
    /// Case-insensitive substring matched against title or description.
    pub search: Option<String>,
}

impl TaskListFilter {
    /// Creates an unfiltered listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to an assignee.
    #[must_use]
    pub const fn assigned(mut self, assignee: AssigneeFilter) -> Self {
        self.assignee = assignee;
        self
    }

    /// Restricts the listing to tasks matching `search`.
    #[must_use]
    pub fn matching(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}
