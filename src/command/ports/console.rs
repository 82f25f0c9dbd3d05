//! Line-oriented input and message output ports.

use thiserror::Error;

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Failures of the console collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsoleError {
    /// Reading the next line failed.
    #[error("failed to read input: {0}")]
    Input(String),

    /// Printing a message failed.
    #[error("failed to print output: {0}")]
    Output(String),
}

/// Source of raw user input, one line per command cycle.
#[cfg_attr(test, mockall::automock)]
pub trait InputSource {
    /// Blocks until the next line is available.
    ///
    /// Returns `Ok(None)` once input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Input`] when the underlying reader fails.
    fn read_line(&mut self) -> ConsoleResult<Option<String>>;
}

/// Destination for messages addressed to the user.
#[cfg_attr(test, mockall::automock)]
pub trait OutputSink {
    /// Prints one message, which may span several lines.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Output`] when the message cannot be written.
    fn print_message(&mut self, message: &str) -> ConsoleResult<()>;
}
