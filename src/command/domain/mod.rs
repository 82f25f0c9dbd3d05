//! Commands, undo actions, and input parsing.

mod command;
mod error;
mod parser;
mod undo;

pub use command::{Command, ExecutedCommand};
pub use error::{CommandError, CommandResult, ParseError};
pub use parser::{ParsedInput, RECURRING_FLAG, parse_input};
pub use undo::UndoAction;
