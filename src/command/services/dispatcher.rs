//! Read-eval-print loop with a bounded undo history.

use mockable::Clock;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

use crate::command::{
    domain::{CommandError, ParsedInput, UndoAction, parse_input},
    ports::{ConsoleResult, InputSource, OutputSink},
};
use crate::task::{ports::TaskStorage, services::TaskRepository};

const GREETING: &str = "Hello! I'm Taskdeck.\nWhat can I do for you?";
const NOTHING_TO_UNDO: &str = "There is nothing to undo.";

/// Response to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Confirmation or error text for the user.
    pub message: String,
    /// Non-fatal storage notice raised while handling the line.
    pub warning: Option<String>,
    /// `true` when the session should end.
    pub exit: bool,
}

/// Owns the repository and turns input lines into executed commands.
///
/// Successful commands that changed state push their undo action onto a
/// history holding at most `history_limit` entries; the oldest entry is
/// dropped first. `undo` pops and applies the newest entry.
#[derive(Debug)]
pub struct CommandDispatcher<S, C>
where
    S: TaskStorage,
    C: Clock,
{
    repository: TaskRepository<S>,
    clock: C,
    history: VecDeque<UndoAction>,
    history_limit: usize,
}

impl<S, C> CommandDispatcher<S, C>
where
    S: TaskStorage,
    C: Clock,
{
    /// Creates a dispatcher. A `history_limit` of zero disables undo.
    #[must_use]
    pub fn new(repository: TaskRepository<S>, clock: C, history_limit: usize) -> Self {
        Self {
            repository,
            clock,
            history: VecDeque::new(),
            history_limit,
        }
    }

    /// Returns the repository.
    #[must_use]
    pub const fn repository(&self) -> &TaskRepository<S> {
        &self.repository
    }

    /// Returns how many undo actions are available.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Handles one input line. Failures become the reply message; the
    /// session always continues unless the line was an exit command.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let (message, exit) = match self.dispatch(line) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(error = %err, "command rejected");
                (format!("OOPS!!! {err}"), false)
            }
        };

        Reply {
            message,
            warning: self.drain_storage_warning(),
            exit,
        }
    }

    /// Runs the loop until input ends or an exit command is handled.
    ///
    /// A storage warning left over from loading is printed after the
    /// greeting.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::command::ports::ConsoleError`] raised by
    /// either collaborator.
    pub fn run<I, O>(&mut self, input: &mut I, output: &mut O) -> ConsoleResult<()>
    where
        I: InputSource + ?Sized,
        O: OutputSink + ?Sized,
    {
        output.print_message(GREETING)?;
        if let Some(warning) = self.drain_storage_warning() {
            output.print_message(&warning)?;
        }

        while let Some(line) = input.read_line()? {
            let reply = self.handle_line(&line);
            output.print_message(&reply.message)?;
            if let Some(warning) = reply.warning {
                output.print_message(&warning)?;
            }
            if reply.exit {
                info!("session ended by user");
                return Ok(());
            }
        }

        info!("input closed; ending session");
        Ok(())
    }

    fn dispatch(&mut self, line: &str) -> Result<(String, bool), CommandError> {
        match parse_input(line, &self.clock)? {
            ParsedInput::Undo => self.undo().map(|message| (message, false)),
            ParsedInput::Run(command) => {
                let executed = command.execute(&mut self.repository, &self.clock)?;
                if let Some(action) = executed.undo {
                    self.remember(action);
                }
                Ok((executed.message, executed.exit))
            }
        }
    }

    fn undo(&mut self) -> Result<String, CommandError> {
        match self.history.pop_back() {
            Some(action) => action.apply(&mut self.repository),
            None => Ok(NOTHING_TO_UNDO.to_owned()),
        }
    }

    fn remember(&mut self, action: UndoAction) {
        if self.history_limit == 0 {
            return;
        }
        if self.history.len() == self.history_limit {
            self.history.pop_front();
        }
        debug!(action = action.name(), depth = self.history.len(), "recorded undo action");
        self.history.push_back(action);
    }

    fn drain_storage_warning(&mut self) -> Option<String> {
        self.repository.take_storage_warning().map(|err| {
            warn!(error = %err, "reporting storage failure to user");
            format!("Warning: task storage failed ({err}). Your tasks are kept for this session.")
        })
    }
}
