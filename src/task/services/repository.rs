//! Ordered task repository with write-through persistence.

use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::task::{
    domain::{Task, TaskError, TaskId, TaskKind},
    ports::{StorageError, TaskStorage},
};

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Contract violations reported by [`TaskRepository`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskRepositoryError {
    /// The zero-based index is outside the list.
    #[error("there is no task number {} (the list has {len} task(s))", .index.saturating_add(1))]
    IndexOutOfRange {
        /// Zero-based index that was requested.
        index: usize,
        /// Number of tasks at the time of the request.
        len: usize,
    },

    /// No task carries the identity.
    #[error("task {0} no longer exists")]
    IdentityNotFound(TaskId),

    /// A replacement task has another kind than the stored one.
    #[error("cannot replace {expected} task with {found} task")]
    KindMismatch {
        /// Kind of the stored task.
        expected: TaskKind,
        /// Kind of the replacement.
        found: TaskKind,
    },

    /// The done flag already has the requested value.
    #[error("task is already marked as {}", if *.done { "done" } else { "not done" })]
    NoStateChange {
        /// Identity of the unchanged task.
        id: TaskId,
        /// Requested (and current) flag value.
        done: bool,
    },

    /// A task with the same identity is already stored.
    #[error("duplicate task identity: {0}")]
    DuplicateIdentity(TaskId),

    /// A stored task rejected the requested change.
    #[error(transparent)]
    InvalidTask(#[from] TaskError),
}

/// Ordered collection of tasks backed by a [`TaskStorage`].
///
/// The in-process sequence is the source of truth: it is loaded once from
/// storage and every successful mutation is written straight back. A failed
/// write never rolls back the in-memory change; it is logged and kept as a
/// pending warning for the caller to surface (see
/// [`TaskRepository::take_storage_warning`]).
///
/// Indices are zero-based and only meaningful until the next mutation.
#[derive(Debug)]
pub struct TaskRepository<S>
where
    S: TaskStorage,
{
    storage: S,
    tasks: Vec<Task>,
    storage_warning: Option<StorageError>,
}

impl<S> TaskRepository<S>
where
    S: TaskStorage,
{
    /// Loads the task list from `storage`.
    ///
    /// Missing data starts an empty list. Corrupt or unreadable data, or a
    /// snapshot with repeated identities, also starts an empty list and
    /// leaves a pending storage warning.
    #[must_use]
    pub fn load(storage: S) -> Self {
        let mut storage_warning = None;
        let tasks = match storage.load_all() {
            Ok(tasks) => match find_duplicate(&tasks) {
                None => {
                    info!(count = tasks.len(), "loaded task list");
                    tasks
                }
                Some(id) => {
                    warn!(task_id = %id, "stored task list repeats an identity; starting empty");
                    storage_warning = Some(StorageError::Corrupt(format!(
                        "task {id} is stored more than once"
                    )));
                    Vec::new()
                }
            },
            Err(StorageError::Missing(location)) => {
                info!(location = %location, "no stored task list; starting empty");
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "could not load task list; starting empty");
                storage_warning = Some(err);
                Vec::new()
            }
        };

        Self {
            storage,
            tasks,
            storage_warning,
        }
    }

    /// Returns a snapshot copy of all tasks in listing order.
    #[must_use]
    pub fn get_all(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the task at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::IndexOutOfRange`] when `index` is not
    /// in `[0, count())`.
    pub fn get_by_index(&self, index: usize) -> TaskRepositoryResult<&Task> {
        self.tasks.get(index).ok_or(TaskRepositoryError::IndexOutOfRange {
            index,
            len: self.tasks.len(),
        })
    }

    /// Returns the task with identity `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::IdentityNotFound`] when `id` is absent.
    pub fn get_by_identity(&self, id: TaskId) -> TaskRepositoryResult<&Task> {
        self.tasks
            .iter()
            .find(|task| task.id() == id)
            .ok_or(TaskRepositoryError::IdentityNotFound(id))
    }

    /// Appends `task` to the end of the list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateIdentity`] when a task with the
    /// same identity is already stored.
    pub fn add(&mut self, task: Task) -> TaskRepositoryResult<()> {
        let len = self.tasks.len();
        self.insert_at(len, task)
    }

    /// Inserts `task` at `index`, shifting later tasks down.
    ///
    /// `index == count()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::IndexOutOfRange`] when `index` is greater
    /// than `count()` and [`TaskRepositoryError::DuplicateIdentity`] when the
    /// identity is already stored.
    pub fn insert_at(&mut self, index: usize, task: Task) -> TaskRepositoryResult<()> {
        if index > self.tasks.len() {
            return Err(TaskRepositoryError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        if self.contains(task.id()) {
            return Err(TaskRepositoryError::DuplicateIdentity(task.id()));
        }

        debug!(task_id = %task.id(), index, "inserting task");
        self.tasks.insert(index, task);
        self.persist();
        Ok(())
    }

    /// Replaces the details and time frame of the task at `index` with those
    /// of `replacement`, keeping the stored identity and done flag.
    ///
    /// Returns the task as it was before the update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::IndexOutOfRange`] for a bad index and
    /// [`TaskRepositoryError::KindMismatch`] when the kinds differ.
    pub fn update_by_index(
        &mut self,
        index: usize,
        replacement: &Task,
    ) -> TaskRepositoryResult<Task> {
        let len = self.tasks.len();
        let existing = self
            .tasks
            .get_mut(index)
            .ok_or(TaskRepositoryError::IndexOutOfRange { index, len })?;
        let previous = revise(existing, replacement)?;
        self.persist();
        Ok(previous)
    }

    /// Identity-addressed variant of [`TaskRepository::update_by_index`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::IdentityNotFound`] when `id` is absent
    /// and [`TaskRepositoryError::KindMismatch`] when the kinds differ.
    pub fn update_by_identity(
        &mut self,
        id: TaskId,
        replacement: &Task,
    ) -> TaskRepositoryResult<Task> {
        let existing = self
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskRepositoryError::IdentityNotFound(id))?;
        let previous = revise(existing, replacement)?;
        self.persist();
        Ok(previous)
    }

    /// Removes and returns the task at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::IndexOutOfRange`] when `index` is not
    /// in `[0, count())`.
    pub fn delete_by_index(&mut self, index: usize) -> TaskRepositoryResult<Task> {
        if index >= self.tasks.len() {
            return Err(TaskRepositoryError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        let removed = self.tasks.remove(index);
        debug!(task_id = %removed.id(), index, "deleted task");
        self.persist();
        Ok(removed)
    }

    /// Removes and returns the task with identity `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::IdentityNotFound`] when `id` is absent.
    pub fn delete_by_identity(&mut self, id: TaskId) -> TaskRepositoryResult<Task> {
        let index = self.index_of(id)?;
        self.delete_by_index(index)
    }

    /// Sets the done flag of the task at `index` and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::IndexOutOfRange`] for a bad index and
    /// [`TaskRepositoryError::NoStateChange`] when the flag already equals
    /// `done`.
    pub fn set_done_by_index(&mut self, index: usize, done: bool) -> TaskRepositoryResult<Task> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(TaskRepositoryError::IndexOutOfRange { index, len })?;
        let updated = apply_done(task, done)?;
        self.persist();
        Ok(updated)
    }

    /// Identity-addressed variant of [`TaskRepository::set_done_by_index`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::IdentityNotFound`] when `id` is absent
    /// and [`TaskRepositoryError::NoStateChange`] when the flag already
    /// equals `done`.
    pub fn set_done_by_identity(&mut self, id: TaskId, done: bool) -> TaskRepositoryResult<Task> {
        let index = self.index_of(id)?;
        self.set_done_by_index(index, done)
    }

    /// Returns tasks whose details contain `query`, ignoring case, in listing
    /// order. An empty result is not an error.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Task> {
        let needle = query.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.details().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Replaces the whole list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateIdentity`] when `tasks` repeats
    /// an identity; the current list is kept.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> TaskRepositoryResult<()> {
        if let Some(id) = find_duplicate(&tasks) {
            return Err(TaskRepositoryError::DuplicateIdentity(id));
        }
        debug!(count = tasks.len(), "replacing task list");
        self.tasks = tasks;
        self.persist();
        Ok(())
    }

    /// Removes every task.
    pub fn clear(&mut self) {
        debug!(count = self.tasks.len(), "clearing task list");
        self.tasks.clear();
        self.persist();
    }

    /// Sorts tasks chronologically by time frame. The sort is stable and
    /// undated tasks go last.
    pub fn sort_by_time_frame(&mut self) {
        self.tasks
            .sort_by(|left, right| left.time_frame().chronological_cmp(right.time_frame()));
        self.persist();
    }

    /// Takes the most recent storage failure, if any, clearing it.
    pub fn take_storage_warning(&mut self) -> Option<StorageError> {
        self.storage_warning.take()
    }

    fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id() == id)
    }

    fn index_of(&self, id: TaskId) -> TaskRepositoryResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(TaskRepositoryError::IdentityNotFound(id))
    }

    fn persist(&mut self) {
        if let Err(err) = self.storage.save_all(&self.tasks) {
            warn!(
                error = %err,
                count = self.tasks.len(),
                "failed to persist task list; in-memory state remains authoritative"
            );
            self.storage_warning = Some(err);
        }
    }
}

fn revise(existing: &mut Task, replacement: &Task) -> TaskRepositoryResult<Task> {
    if existing.kind() != replacement.kind() {
        return Err(TaskRepositoryError::KindMismatch {
            expected: existing.kind(),
            found: replacement.kind(),
        });
    }
    let previous = existing.clone();
    existing.revise_from(replacement)?;
    debug!(task_id = %existing.id(), "updated task");
    Ok(previous)
}

fn apply_done(task: &mut Task, done: bool) -> TaskRepositoryResult<Task> {
    if task.is_done() == done {
        return Err(TaskRepositoryError::NoStateChange { id: task.id(), done });
    }
    task.set_done(done);
    debug!(task_id = %task.id(), done, "updated done flag");
    Ok(task.clone())
}

fn find_duplicate(tasks: &[Task]) -> Option<TaskId> {
    let mut seen = HashSet::with_capacity(tasks.len());
    tasks
        .iter()
        .map(Task::id)
        .find(|id| !seen.insert(*id))
}
