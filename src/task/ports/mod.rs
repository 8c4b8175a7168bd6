//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod directory;
pub mod repository;

pub use directory::{TeamDirectory, TeamDirectoryError, TeamDirectoryResult};
pub use repository::{
    ColumnPlacement, TagWrite, TaskQuery, TaskRepository, TaskRepositoryError,
    TaskRepositoryResult,
};
