//! User commands and their execution against the repository.

use mockable::Clock;
use tracing::debug;

use super::{CommandResult, UndoAction};
use crate::task::{domain::Task, ports::TaskStorage, services::TaskRepository};

/// One user intent, executed at most once.
///
/// Indices are 0-based positions in the listing at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a new task.
    Add(Task),
    /// Mark the task at `index` as done.
    MarkDone {
        /// Position of the task.
        index: usize,
    },
    /// Remove the task at `index`.
    Delete {
        /// Position of the task.
        index: usize,
    },
    /// Rebuild the task at `index` from new text, keeping its kind.
    Update {
        /// Position of the task.
        index: usize,
        /// New description including any dates.
        text: String,
        /// Marks the rebuilt task recurring. When `false` the stored flag
        /// is kept.
        recurring: bool,
    },
    /// Show every task.
    List,
    /// Show tasks whose details contain `query`.
    Search {
        /// Case-insensitive search term.
        query: String,
    },
    /// Remove every task.
    Clear,
    /// Order tasks chronologically.
    Sort,
    /// End the session.
    Exit,
}

/// Outcome of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedCommand {
    /// Confirmation shown to the user.
    pub message: String,
    /// Action that reverses the command, when it changed anything.
    pub undo: Option<UndoAction>,
    /// `true` when the session should end.
    pub exit: bool,
}

impl ExecutedCommand {
    fn reply(message: String) -> Self {
        Self {
            message,
            undo: None,
            exit: false,
        }
    }

    fn undoable(message: String, undo: UndoAction) -> Self {
        Self {
            message,
            undo: Some(undo),
            exit: false,
        }
    }
}

impl Command {
    /// Returns the keyword naming this command in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::MarkDone { .. } => "done",
            Self::Delete { .. } => "delete",
            Self::Update { .. } => "edit",
            Self::List => "list",
            Self::Search { .. } => "find",
            Self::Clear => "clear",
            Self::Sort => "sort",
            Self::Exit => "bye",
        }
    }

    /// Executes the command, consuming it so it cannot run twice.
    ///
    /// Marking a task that is already done succeeds with no undo action.
    /// `clock` resolves weekday names when an edit rebuilds a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::CommandError::Repository`] when the repository
    /// rejects the operation and [`super::CommandError::Task`] when edited
    /// text cannot form a task. The repository is unchanged in both cases.
    pub fn execute<S>(
        self,
        repository: &mut TaskRepository<S>,
        clock: &impl Clock,
    ) -> CommandResult<ExecutedCommand>
    where
        S: TaskStorage,
    {
        debug!(command = self.name(), "executing command");
        match self {
            Self::Add(task) => add(repository, task),
            Self::MarkDone { index } => mark_done(repository, index),
            Self::Delete { index } => delete(repository, index),
            Self::Update {
                index,
                text,
                recurring,
            } => update(repository, index, &text, recurring, clock),
            Self::List => Ok(ExecutedCommand::reply(render_list(
                "Here are the tasks in your list:",
                "You have no tasks in your list.",
                &repository.get_all(),
            ))),
            Self::Search { query } => Ok(ExecutedCommand::reply(render_list(
                "Here are the matching tasks in your list:",
                &format!("No tasks match \"{query}\"."),
                &repository.search(&query),
            ))),
            Self::Clear => Ok(clear(repository)),
            Self::Sort => Ok(sort(repository)),
            Self::Exit => Ok(ExecutedCommand {
                message: "Bye. Hope to see you again soon!".to_owned(),
                undo: None,
                exit: true,
            }),
        }
    }
}

fn add<S: TaskStorage>(
    repository: &mut TaskRepository<S>,
    task: Task,
) -> CommandResult<ExecutedCommand> {
    let id = task.id();
    let description = task.description();
    repository.add(task)?;
    Ok(ExecutedCommand::undoable(
        format!(
            "Got it. I've added this task:\n  {description}\n{}",
            task_count(repository.count())
        ),
        UndoAction::RemoveAdded { id },
    ))
}

fn mark_done<S: TaskStorage>(
    repository: &mut TaskRepository<S>,
    index: usize,
) -> CommandResult<ExecutedCommand> {
    let current = repository.get_by_index(index)?;
    if current.is_done() {
        return Ok(ExecutedCommand::reply(format!(
            "This task is already marked as done:\n  {}",
            current.description()
        )));
    }

    let updated = repository.set_done_by_index(index, true)?;
    Ok(ExecutedCommand::undoable(
        format!(
            "Nice! I've marked this task as done:\n  {}",
            updated.description()
        ),
        UndoAction::RestoreDone {
            id: updated.id(),
            done: false,
        },
    ))
}

fn delete<S: TaskStorage>(
    repository: &mut TaskRepository<S>,
    index: usize,
) -> CommandResult<ExecutedCommand> {
    let removed = repository.delete_by_index(index)?;
    let message = format!(
        "Noted. I've removed this task:\n  {}\n{}",
        removed.description(),
        task_count(repository.count())
    );
    Ok(ExecutedCommand::undoable(
        message,
        UndoAction::Reinsert {
            task: removed,
            index,
        },
    ))
}

fn update<S: TaskStorage>(
    repository: &mut TaskRepository<S>,
    index: usize,
    text: &str,
    recurring: bool,
    clock: &impl Clock,
) -> CommandResult<ExecutedCommand> {
    let existing = repository.get_by_index(index)?;
    let replacement = Task::create(existing.kind(), text, clock)?
        .with_recurring(recurring || existing.is_recurring());
    let previous = repository.update_by_index(index, &replacement)?;
    let updated = repository.get_by_index(index)?;

    Ok(ExecutedCommand::undoable(
        format!("Got it. I've updated this task:\n  {}", updated.description()),
        UndoAction::RestoreContents {
            id: previous.id(),
            previous,
        },
    ))
}

fn clear<S: TaskStorage>(repository: &mut TaskRepository<S>) -> ExecutedCommand {
    let previous = repository.get_all();
    if previous.is_empty() {
        return ExecutedCommand::reply("Your list is already empty.".to_owned());
    }

    repository.clear();
    ExecutedCommand::undoable(
        format!("Cleared your list. Removed {}.", plural_tasks(previous.len())),
        UndoAction::RestoreAll { tasks: previous },
    )
}

fn sort<S: TaskStorage>(repository: &mut TaskRepository<S>) -> ExecutedCommand {
    let previous = repository.get_all();
    repository.sort_by_time_frame();
    let sorted = repository.get_all();
    let listing = render_list(
        "Sorted your tasks by date:",
        "You have no tasks in your list.",
        &sorted,
    );
    if previous.iter().map(Task::id).eq(sorted.iter().map(Task::id)) {
        return ExecutedCommand::reply(listing);
    }
    ExecutedCommand::undoable(listing, UndoAction::RestoreAll { tasks: previous })
}

fn render_list(header: &str, empty: &str, tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return empty.to_owned();
    }

    tasks
        .iter()
        .zip(1_usize..)
        .fold(header.to_owned(), |mut listing, (task, number)| {
            listing.push_str(&format!("\n{number}. {}", task.description()));
            listing
        })
}

pub(super) fn task_count(count: usize) -> String {
    format!("Now you have {} in the list.", plural_tasks(count))
}

pub(super) fn plural_tasks(count: usize) -> String {
    if count == 1 {
        "1 task".to_owned()
    } else {
        format!("{count} tasks")
    }
}
