//! In-memory task storage for tests and ephemeral sessions.

use std::sync::{Arc, RwLock};

use crate::task::{
    domain::Task,
    ports::{StorageError, StorageResult, TaskStorage},
};

/// Thread-safe in-memory task storage.
///
/// Clones share the same snapshot, so a test can keep a handle and inspect
/// what the repository wrote through.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStorage {
    state: Arc<RwLock<Option<Vec<Task>>>>,
}

impl InMemoryTaskStorage {
    /// Creates storage with nothing stored yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage already holding `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Some(tasks))),
        }
    }

    /// Returns the stored snapshot, or `None` when nothing has been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the lock is poisoned.
    pub fn snapshot(&self) -> StorageResult<Option<Vec<Task>>> {
        let state = self
            .state
            .read()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        Ok(state.clone())
    }
}

impl TaskStorage for InMemoryTaskStorage {
    fn load_all(&self) -> StorageResult<Vec<Task>> {
        self.snapshot()?
            .ok_or_else(|| StorageError::Missing("memory".to_owned()))
    }

    fn save_all(&self, tasks: &[Task]) -> StorageResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        *state = Some(tasks.to_vec());
        Ok(())
    }
}
