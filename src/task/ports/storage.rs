//! Storage port: the sole persistence boundary for the task list.

use std::sync::Arc;
use thiserror::Error;

use crate::task::domain::Task;

/// Result type for task storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Dumb get/set persistence of the full ordered task sequence.
///
/// `load_all` returns the stored snapshot; `save_all` replaces it wholesale.
/// Implementations hold no ordering or identity rules of their own.
#[cfg_attr(test, mockall::automock)]
pub trait TaskStorage {
    /// Reads the stored task sequence.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Missing`] when nothing has been stored yet and
    /// [`StorageError::Corrupt`] when the stored data cannot be read back.
    fn load_all(&self) -> StorageResult<Vec<Task>>;

    /// Replaces the stored task sequence.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the snapshot cannot be written.
    fn save_all(&self, tasks: &[Task]) -> StorageResult<()>;
}

/// Errors returned by task storage implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// No stored task list exists yet.
    #[error("no stored task list at {0}")]
    Missing(String),

    /// Stored data exists but could not be decoded.
    #[error("stored task list is corrupt: {0}")]
    Corrupt(String),

    /// The storage backend cannot be reached.
    #[error("task storage is unavailable: {0}")]
    Unavailable(String),

    /// Underlying I/O failure.
    #[error("task storage I/O error: {0}")]
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
