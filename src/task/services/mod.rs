//! Application services for the task board.

mod board;
mod outcome;
mod requests;
mod view;

pub use board::{TaskBoardError, TaskBoardResult, TaskBoardService};
pub use outcome::{BoardAction, Outcome, Rejection};
pub use requests::{AssigneeFilter, CreateTaskRequest, TaskListFilter, UpdateTaskRequest};
pub use view::{TaskChange, TaskView};
