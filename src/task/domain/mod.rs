//! Domain model for tasks.
//!
//! A task's kind is a closed variant that fixes the shape of its time frame
//! for the task's whole lifetime. Construction from user text goes through
//! [`Task::create`], which delegates date handling to [`crate::datetime`].

mod error;
mod ids;
mod kind;
mod task;
mod time_frame;

pub use error::{ParseTaskKindError, TaskError, TaskResult};
pub use ids::TaskId;
pub use kind::TaskKind;
pub use task::{PersistedTaskData, Task};
pub use time_frame::TimeFrame;
