//! Application services for the task list.

mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
