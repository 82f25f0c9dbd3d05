//! Reversing actions recorded by executed commands.

use tracing::debug;

use super::{CommandResult, command::plural_tasks};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskStorage,
    services::TaskRepository,
};

/// Data needed to reverse one executed command.
///
/// Actions address tasks by identity because positions may have shifted
/// since the command ran. Applying an action is final: it yields no further
/// undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoAction {
    /// Remove a task that was added.
    RemoveAdded {
        /// Identity of the added task.
        id: TaskId,
    },
    /// Put a done flag back to its earlier value.
    RestoreDone {
        /// Identity of the changed task.
        id: TaskId,
        /// Flag value before the command.
        done: bool,
    },
    /// Re-insert a deleted task at its old position, or at the end when
    /// that position no longer exists.
    Reinsert {
        /// The deleted task, identity included.
        task: Task,
        /// Position the task had before deletion.
        index: usize,
    },
    /// Replace the whole list with an earlier snapshot.
    RestoreAll {
        /// Snapshot taken before the command.
        tasks: Vec<Task>,
    },
    /// Put back the details and time frame a task had before an edit.
    RestoreContents {
        /// Identity of the edited task.
        id: TaskId,
        /// The task as it was before the edit.
        previous: Task,
    },
}

impl UndoAction {
    /// Returns a short label for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RemoveAdded { .. } => "remove_added",
            Self::RestoreDone { .. } => "restore_done",
            Self::Reinsert { .. } => "reinsert",
            Self::RestoreAll { .. } => "restore_all",
            Self::RestoreContents { .. } => "restore_contents",
        }
    }

    /// Applies the action and returns a confirmation message.
    ///
    /// # Errors
    ///
    /// Returns [`super::CommandError::Repository`] when the targeted task no
    /// longer exists or the repository rejects the change.
    pub fn apply<S>(self, repository: &mut TaskRepository<S>) -> CommandResult<String>
    where
        S: TaskStorage,
    {
        debug!(action = self.name(), "applying undo action");
        match self {
            Self::RemoveAdded { id } => {
                let removed = repository.delete_by_identity(id)?;
                Ok(format!(
                    "Undone. I've removed this task again:\n  {}",
                    removed.description()
                ))
            }
            Self::RestoreDone { id, done } => {
                let task = repository.set_done_by_identity(id, done)?;
                let state = if done { "done" } else { "not done" };
                Ok(format!(
                    "Undone. I've marked this task as {state}:\n  {}",
                    task.description()
                ))
            }
            Self::Reinsert { task, index } => {
                let description = task.description();
                let position = index.min(repository.count());
                repository.insert_at(position, task)?;
                Ok(format!("Undone. I've put this task back:\n  {description}"))
            }
            Self::RestoreAll { tasks } => {
                let count = tasks.len();
                repository.replace_all(tasks)?;
                Ok(format!(
                    "Undone. Your list is back to {}.",
                    plural_tasks(count)
                ))
            }
            Self::RestoreContents { id, previous } => {
                repository.update_by_identity(id, &previous)?;
                let restored = repository.get_by_identity(id)?;
                let description = restored.description();
                Ok(format!("Undone. I've restored this task:\n  {description}"))
            }
        }
    }
}
