//! Task tags.
//!
//! Tags have no identity of their own: a task's tag list is always
//! replaced as a whole.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Color applied when a tag payload omits one.
pub const DEFAULT_TAG_COLOR: &str = "#0ea5e9";

const MAX_TAG_NAME_CHARS: usize = 50;
const MAX_TAG_COLOR_CHARS: usize = 20;

/// Label attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskTag {
    name: String,
    color: String,
}

impl TaskTag {
    /// Creates a validated tag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTagName`] for a blank name,
    /// [`TaskDomainError::TagNameTooLong`] or
    /// [`TaskDomainError::TagColorTooLong`] when a field exceeds its
    /// column width.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw_name = name.into();
        let trimmed_name = raw_name.trim();
        if trimmed_name.is_empty() {
            return Err(TaskDomainError::EmptyTagName);
        }
        if trimmed_name.chars().count() > MAX_TAG_NAME_CHARS {
            return Err(TaskDomainError::TagNameTooLong(raw_name));
        }

        let raw_color = color.into();
        let trimmed_color = raw_color.trim();
        let resolved_color = if trimmed_color.is_empty() {
            DEFAULT_TAG_COLOR
        } else {
            trimmed_color
        };
        if resolved_color.chars().count() > MAX_TAG_COLOR_CHARS {
            return Err(TaskDomainError::TagColorTooLong(raw_color));
        }

        Ok(Self {
            name: trimmed_name.to_owned(),
            color: resolved_color.to_owned(),
        })
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tag color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Unvalidated tag entry as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInput {
    /// Tag name; entries without one are rejected on create and skipped on
    /// replacement.
    pub name: Option<String>,
    /// Tag color; [`DEFAULT_TAG_COLOR`] when absent.
    pub color: Option<String>,
}

impl TagInput {
    /// Creates an entry with a name and explicit color.
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            color: Some(color.into()),
        }
    }

    /// Creates an entry that will receive the default color.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            color: None,
        }
    }

    fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.trim().is_empty())
    }

    fn into_tag(self) -> Result<TaskTag, TaskDomainError> {
        TaskTag::new(
            self.name.unwrap_or_default(),
            self.color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_owned()),
        )
    }
}

/// Validates the tag list supplied when creating a task.
///
/// # Errors
///
/// Returns the first [`TaskDomainError`] raised by an entry, including
/// [`TaskDomainError::EmptyTagName`] for entries without a name.
pub fn tags_for_create(
    inputs: impl IntoIterator<Item = TagInput>,
) -> Result<Vec<TaskTag>, TaskDomainError> {
    inputs.into_iter().map(TagInput::into_tag).collect()
}

/// Validates a replacement tag list supplied on update.
///
/// Entries without a name are skipped rather than rejected.
///
/// # Errors
///
/// Returns the first [`TaskDomainError`] raised by a named entry.
pub fn tags_for_replacement(
    inputs: impl IntoIterator<Item = TagInput>,
) -> Result<Vec<TaskTag>, TaskDomainError> {
    inputs
        .into_iter()
        .filter(TagInput::has_name)
        .map(TagInput::into_tag)
        .collect()
}
