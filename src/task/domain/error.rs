//! Error types for task construction and mutation.

use thiserror::Error;

use super::TaskKind;
use crate::datetime::DateTimeError;

/// Result type for task domain operations.
pub type TaskResult<T> = Result<T, TaskError>;

/// Errors returned while creating or changing a task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    /// The date/time portion of the input could not be used.
    #[error(transparent)]
    DateTime(#[from] DateTimeError),

    /// The time frame shape is illegal for the task kind.
    #[error("the given time frame is not compatible with {kind} tasks")]
    IncompatibleTimeFrame {
        /// Kind whose shape rule was violated.
        kind: TaskKind,
    },

    /// The description is empty once dates are removed.
    #[error("the description of {kind} tasks cannot be empty")]
    EmptyDetails {
        /// Kind of the task being built.
        kind: TaskKind,
    },

    /// A replacement task has a different kind from the task it replaces.
    #[error("cannot replace {expected} task with {found} task")]
    KindChange {
        /// Kind of the existing task.
        expected: TaskKind,
        /// Kind of the replacement.
        found: TaskKind,
    },
}

/// Error returned while parsing a task kind from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task kind: {0}")]
pub struct ParseTaskKindError(pub String);
