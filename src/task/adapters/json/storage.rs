//! JSON file task storage backed by a capability-scoped directory handle.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use tracing::debug;

use super::TaskDocument;
use crate::task::{
    domain::Task,
    ports::{StorageError, StorageResult, TaskStorage},
};

const TEMP_SUFFIX: &str = ".tmp";

/// Stores the task list as a pretty-printed JSON document.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a failed write leaves the previous snapshot intact.
#[derive(Debug)]
pub struct JsonFileTaskStorage {
    dir: Dir,
    file_name: String,
    path: Utf8PathBuf,
}

impl JsonFileTaskStorage {
    /// Opens storage for the file at `path`, creating its parent directory
    /// when needed. The file itself is created on first save.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when `path` has no file name and
    /// [`StorageError::Io`] when the directory cannot be created or opened.
    pub fn open(path: &Utf8Path) -> StorageResult<Self> {
        let file_name = path
            .file_name()
            .ok_or_else(|| StorageError::Unavailable(format!("{path} does not name a file")))?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };

        Dir::create_ambient_dir_all(parent, ambient_authority())?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;

        Ok(Self {
            dir,
            file_name: file_name.to_owned(),
            path: path.to_path_buf(),
        })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl TaskStorage for JsonFileTaskStorage {
    fn load_all(&self) -> StorageResult<Vec<Task>> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StorageError::Missing(self.path.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let document: TaskDocument = serde_json::from_str(&contents)
            .map_err(|err| StorageError::Corrupt(err.to_string()))?;
        let tasks = document.into_tasks()?;
        debug!(path = %self.path, count = tasks.len(), "loaded task document");
        Ok(tasks)
    }

    fn save_all(&self, tasks: &[Task]) -> StorageResult<()> {
        let document = TaskDocument::from_tasks(tasks);
        let json = serde_json::to_string_pretty(&document)
            .map_err(|err| StorageError::Corrupt(err.to_string()))?;

        let temp_name = format!("{}{TEMP_SUFFIX}", self.file_name);
        self.dir.write(&temp_name, json.as_bytes())?;
        self.dir.rename(&temp_name, &self.dir, &self.file_name)?;
        debug!(path = %self.path, count = tasks.len(), "saved task document");
        Ok(())
    }
}
