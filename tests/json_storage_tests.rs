//! Integration tests for the JSON file storage adapter.

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use taskdeck::task::{
    adapters::json::JsonFileTaskStorage,
    domain::{Task, TaskKind, TimeFrame},
    ports::{StorageError, TaskStorage},
    services::TaskRepository,
};
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = Utf8Path::from_path(dir.path())
        .expect("utf-8 temp dir")
        .to_path_buf();
    Workspace { _dir: dir, root }
}

fn tasks() -> Vec<Task> {
    let due = chrono::NaiveDate::from_ymd_opt(2024, 12, 2)
        .and_then(|date| date.and_hms_opt(18, 0, 0))
        .expect("valid instant");
    let mut deadline = Task::new(TaskKind::Deadline, "submit report", TimeFrame::ending(due))
        .expect("valid deadline");
    deadline.set_done(true);
    vec![
        Task::new(TaskKind::ToDo, "read book", TimeFrame::unbounded())
            .expect("valid todo")
            .with_recurring(true),
        deadline,
    ]
}

#[rstest]
fn missing_file_is_reported_as_missing(workspace: Workspace) {
    let storage = JsonFileTaskStorage::open(&workspace.path("tasks.json")).expect("open storage");

    assert!(matches!(storage.load_all(), Err(StorageError::Missing(_))));
}

#[rstest]
fn saved_tasks_reload_with_identity_and_flags(workspace: Workspace) {
    let path = workspace.path("nested/dir/tasks.json");
    let storage = JsonFileTaskStorage::open(&path).expect("open storage");
    let original = tasks();

    storage.save_all(&original).expect("save tasks");
    let reloaded = JsonFileTaskStorage::open(&path)
        .expect("reopen storage")
        .load_all()
        .expect("load tasks");

    assert_eq!(reloaded, original);
    for (loaded, saved) in reloaded.iter().zip(&original) {
        assert_eq!(loaded.id(), saved.id());
        assert_eq!(loaded.is_done(), saved.is_done());
        assert_eq!(loaded.is_recurring(), saved.is_recurring());
        assert_eq!(loaded.description(), saved.description());
    }
}

#[rstest]
fn save_replaces_file_without_leaving_temp_file(workspace: Workspace) {
    let path = workspace.path("tasks.json");
    let storage = JsonFileTaskStorage::open(&path).expect("open storage");

    storage.save_all(&tasks()).expect("first save");
    storage.save_all(&[]).expect("second save");

    assert_eq!(storage.load_all().expect("load"), Vec::new());
    let names: Vec<String> = std::fs::read_dir(workspace.root.as_std_path())
        .expect("list dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(names, vec!["tasks.json"]);
}

#[rstest]
#[case("not json at all")]
#[case(r#"{"version": 99, "tasks": []}"#)]
#[case(
    r#"{"version": 1, "tasks": [{"id": "5f0c6a2e-8f4d-4c1b-9a53-2b7f0f2f9c11", "kind": "deadline", "details": "x", "start": null, "end": null}]}"#
)]
fn unreadable_documents_are_corrupt(workspace: Workspace, #[case] contents: &str) {
    let path = workspace.path("tasks.json");
    std::fs::write(path.as_std_path(), contents).expect("write fixture");
    let storage = JsonFileTaskStorage::open(&path).expect("open storage");

    assert!(matches!(storage.load_all(), Err(StorageError::Corrupt(_))));
}

#[rstest]
fn repository_starts_empty_over_corrupt_file_and_overwrites_it(workspace: Workspace) {
    let path = workspace.path("tasks.json");
    std::fs::write(path.as_std_path(), "{").expect("write fixture");
    let storage = JsonFileTaskStorage::open(&path).expect("open storage");

    let mut repository = TaskRepository::load(storage);
    assert!(repository.is_empty());
    assert!(matches!(
        repository.take_storage_warning(),
        Some(StorageError::Corrupt(_))
    ));

    let task = tasks().into_iter().next().expect("sample task");
    repository.add(task.clone()).expect("add task");

    let reloaded = JsonFileTaskStorage::open(&path)
        .expect("reopen storage")
        .load_all()
        .expect("file repaired by write-through");
    assert_eq!(reloaded, vec![task]);
}

#[rstest]
fn document_is_human_readable_json(workspace: Workspace) {
    let path = workspace.path("tasks.json");
    let storage = JsonFileTaskStorage::open(&path).expect("open storage");
    storage.save_all(&tasks()).expect("save tasks");

    let contents = std::fs::read_to_string(path.as_std_path()).expect("read file");
    let value: serde_json::Value = serde_json::from_str(&contents).expect("valid json");

    assert_eq!(value["version"], 1);
    assert_eq!(value["tasks"][1]["kind"], "deadline");
    assert_eq!(value["tasks"][1]["end"], "2024-12-02T18:00:00");
    assert_eq!(value["tasks"][1]["done"], true);
    assert_eq!(value["tasks"][0]["recurring"], true);
}
