//! Error types for command parsing and execution.

use thiserror::Error;

use crate::task::{domain::TaskError, services::TaskRepositoryError};

/// Result type for command operations.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors raised while turning an input line into a command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line held no command keyword.
    #[error("please type a command")]
    EmptyInput,

    /// The keyword is not part of the command grammar.
    #[error("I'm sorry, but I don't know what '{0}' means")]
    UnknownCommand(String),

    /// A required argument was not supplied.
    #[error("the {command} command needs {argument}")]
    MissingArgument {
        /// Command keyword.
        command: &'static str,
        /// Human-readable name of the missing argument.
        argument: &'static str,
    },

    /// A command that takes no arguments was given some.
    #[error("the {command} command does not take any arguments")]
    UnexpectedArgument {
        /// Command keyword.
        command: &'static str,
    },

    /// A task number was not a positive integer.
    #[error("'{0}' is not a valid task number")]
    InvalidIndex(String),
}

/// Failures of a single command, reported to the user without ending the
/// session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The input line could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A task could not be built from the supplied text.
    #[error(transparent)]
    Task(#[from] TaskError),

    /// The repository rejected the operation.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}
