//! In-memory adapters for tests and single-process deployments.

mod directory;
mod task;

pub use directory::InMemoryTeamDirectory;
pub use task::InMemoryTaskRepository;
