//! On-disk document model for JSON task storage.

use serde::{Deserialize, Serialize};

use crate::task::{
    domain::{PersistedTaskData, Task},
    ports::{StorageError, StorageResult},
};

/// Document version written by this build.
pub const CURRENT_DOCUMENT_VERSION: u32 = 1;

/// Top-level JSON document holding the ordered task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDocument {
    /// Document format version.
    pub version: u32,
    /// Tasks in listing order.
    pub tasks: Vec<PersistedTaskData>,
}

impl TaskDocument {
    /// Builds a document from the current task sequence.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            version: CURRENT_DOCUMENT_VERSION,
            tasks: tasks.iter().cloned().map(PersistedTaskData::from).collect(),
        }
    }

    /// Converts the document back into validated tasks.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] for an unsupported version or a
    /// task that violates its kind's rules.
    pub fn into_tasks(self) -> StorageResult<Vec<Task>> {
        if self.version != CURRENT_DOCUMENT_VERSION {
            return Err(StorageError::Corrupt(format!(
                "unsupported document version {}",
                self.version
            )));
        }

        self.tasks
            .into_iter()
            .enumerate()
            .map(|(position, data)| {
                Task::from_persisted(data).map_err(|err| {
                    StorageError::Corrupt(format!("task {} is invalid: {err}", position.saturating_add(1)))
                })
            })
            .collect()
    }
}
