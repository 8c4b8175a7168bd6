//! Domain model for the task board.
//!
//! The domain covers column ordering, status transitions and tag handling
//! while keeping all infrastructure concerns outside of the domain
//! boundary.

mod edit;
mod error;
mod ids;
mod member;
mod position;
mod status;
mod tag;
mod task;
mod transition;

pub use edit::TaskEdit;
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle, TeamId, UserId};
pub use member::{MemberSummary, TeamMember};
pub use position::{ColumnKey, Position, PositionAllocator};
pub use status::{TaskPriority, TaskStatus};
pub use tag::{DEFAULT_TAG_COLOR, TagInput, TaskTag, tags_for_create, tags_for_replacement};
pub use task::{NewTaskData, PersistedTaskData, Task};
pub use transition::{StatusChange, completion_timestamp};
