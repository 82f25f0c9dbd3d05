//! Tests for the storage adapters and the JSON document model.

use crate::task::{
    adapters::{
        json::{CURRENT_DOCUMENT_VERSION, TaskDocument},
        memory::InMemoryTaskStorage,
    },
    domain::{PersistedTaskData, Task, TaskId, TaskKind, TimeFrame},
    ports::{StorageError, TaskStorage},
};
use crate::test_support::at;
use rstest::rstest;

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new(TaskKind::ToDo, "read book", TimeFrame::unbounded()).expect("valid todo"),
        Task::new(
            TaskKind::Event,
            "meeting",
            TimeFrame::between(at(2024, 1, 1, 9, 0), at(2024, 1, 1, 11, 0)),
        )
        .expect("valid event")
        .with_recurring(true),
    ]
}

#[rstest]
fn memory_storage_reports_missing_until_first_save() {
    let storage = InMemoryTaskStorage::new();

    assert!(matches!(storage.load_all(), Err(StorageError::Missing(_))));

    storage.save_all(&[]).expect("save empty list");
    assert_eq!(storage.load_all().expect("load after save"), Vec::new());
}

#[rstest]
fn memory_storage_clones_share_snapshot() {
    let storage = InMemoryTaskStorage::new();
    let observer = storage.clone();
    let tasks = sample_tasks();

    storage.save_all(&tasks).expect("save tasks");

    assert_eq!(observer.snapshot().expect("lock"), Some(tasks));
}

#[rstest]
fn document_round_trips_tasks_with_identity_and_flags() {
    let tasks = sample_tasks();

    let restored = TaskDocument::from_tasks(&tasks)
        .into_tasks()
        .expect("document converts back");

    assert_eq!(restored, tasks);
    let ids: Vec<TaskId> = restored.iter().map(Task::id).collect();
    assert_eq!(ids, tasks.iter().map(Task::id).collect::<Vec<_>>());
    assert!(restored.get(1).is_some_and(Task::is_recurring));
}

#[rstest]
fn document_rejects_unknown_version() {
    let document = TaskDocument {
        version: CURRENT_DOCUMENT_VERSION + 1,
        tasks: Vec::new(),
    };

    let error = document.into_tasks().expect_err("version must be rejected");
    assert!(matches!(error, StorageError::Corrupt(message) if message.contains("version")));
}

#[rstest]
fn document_rejects_task_breaking_kind_rules() {
    let broken = PersistedTaskData {
        id: TaskId::new(),
        kind: TaskKind::Deadline,
        details: "no due date".to_owned(),
        start: None,
        end: None,
        done: false,
        recurring: false,
    };
    let document = TaskDocument {
        version: CURRENT_DOCUMENT_VERSION,
        tasks: vec![broken],
    };

    let error = document.into_tasks().expect_err("shape must be rejected");
    assert!(matches!(error, StorageError::Corrupt(message) if message.starts_with("task 1 is invalid")));
}

#[rstest]
fn document_json_omits_nothing_needed_to_reload() {
    let json = serde_json::to_string(&TaskDocument::from_tasks(&sample_tasks()))
        .expect("serialize document");
    let document: TaskDocument = serde_json::from_str(&json).expect("parse document");

    assert_eq!(document.version, CURRENT_DOCUMENT_VERSION);
    assert_eq!(document.tasks.len(), 2);
    assert!(json.contains("\"kind\":\"event\""));
}

#[rstest]
fn document_defaults_missing_flags_to_false() {
    let json = format!(
        r#"{{"version":1,"tasks":[{{"id":"{}","kind":"to_do","details":"x","start":null,"end":null}}]}}"#,
        TaskId::new()
    );
    let document: TaskDocument = serde_json::from_str(&json).expect("parse document");
    let tasks = document.into_tasks().expect("valid tasks");

    let task = tasks.first().expect("one task");
    assert!(!task.is_done());
    assert!(!task.is_recurring());
}
