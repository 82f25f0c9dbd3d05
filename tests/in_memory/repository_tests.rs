//! Repository contracts exercised through the public API.

use super::helpers::{FixedClock, clock, sample_tasks};
use rstest::rstest;
use taskdeck::{
    command::domain::Command,
    task::{
        adapters::memory::InMemoryTaskStorage,
        domain::{Task, TaskKind},
        services::{TaskRepository, TaskRepositoryError},
    },
};

fn load(tasks: Vec<Task>) -> (TaskRepository<InMemoryTaskStorage>, InMemoryTaskStorage) {
    let storage = InMemoryTaskStorage::with_tasks(tasks);
    (TaskRepository::load(storage.clone()), storage)
}

#[rstest]
fn add_then_undo_leaves_list_and_count_unchanged(sample_tasks: Vec<Task>, clock: FixedClock) {
    let (mut repository, storage) = load(sample_tasks.clone());
    let task = Task::create(TaskKind::ToDo, "call mum", &clock).expect("valid task");

    let executed = Command::Add(task)
        .execute(&mut repository, &clock)
        .expect("add succeeds");
    assert_eq!(repository.count(), 4);

    executed
        .undo
        .expect("add is undoable")
        .apply(&mut repository)
        .expect("undo succeeds");

    assert_eq!(repository.get_all(), sample_tasks);
    assert_eq!(repository.count(), 3);
    assert_eq!(storage.snapshot().expect("lock"), Some(sample_tasks));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn delete_then_undo_restores_identity_at_position(
    sample_tasks: Vec<Task>,
    clock: FixedClock,
    #[case] index: usize,
) {
    let (mut repository, _) = load(sample_tasks.clone());

    let executed = Command::Delete { index }
        .execute(&mut repository, &clock)
        .expect("delete succeeds");
    executed
        .undo
        .expect("delete is undoable")
        .apply(&mut repository)
        .expect("undo succeeds");

    let ids: Vec<_> = repository.get_all().iter().map(Task::id).collect();
    let original_ids: Vec<_> = sample_tasks.iter().map(Task::id).collect();
    assert_eq!(ids, original_ids);
}

#[rstest]
fn marking_twice_is_idempotent(sample_tasks: Vec<Task>, clock: FixedClock) {
    let (mut repository, _) = load(sample_tasks);

    let first = Command::MarkDone { index: 2 }
        .execute(&mut repository, &clock)
        .expect("first mark");
    let second = Command::MarkDone { index: 2 }
        .execute(&mut repository, &clock)
        .expect("second mark");

    assert!(first.undo.is_some());
    assert!(second.undo.is_none());
    assert!(repository.get_by_index(2).is_ok_and(Task::is_done));
}

#[rstest]
fn update_with_other_kind_always_fails(sample_tasks: Vec<Task>, clock: FixedClock) {
    let (mut repository, _) = load(sample_tasks);
    let replacements = [
        Task::create(TaskKind::ToDo, "meeting", &clock).expect("todo"),
        Task::create(TaskKind::Deadline, "meeting 1/1/2024 0900", &clock).expect("deadline"),
        Task::create(TaskKind::DoAfter, "meeting 1/1/2024 0900", &clock).expect("do-after"),
    ];

    for replacement in &replacements {
        assert_eq!(
            repository.update_by_index(2, replacement),
            Err(TaskRepositoryError::KindMismatch {
                expected: TaskKind::Event,
                found: replacement.kind(),
            })
        );
    }
}

#[rstest]
fn empty_repository_rejects_every_index() {
    let mut repository = TaskRepository::load(InMemoryTaskStorage::new());

    for index in [0, 1, usize::MAX] {
        assert_eq!(
            repository.delete_by_index(index),
            Err(TaskRepositoryError::IndexOutOfRange { index, len: 0 })
        );
    }
}

#[rstest]
fn second_repository_sees_written_through_state(sample_tasks: Vec<Task>) {
    let (mut repository, storage) = load(sample_tasks);
    repository.delete_by_index(0).expect("delete first");
    repository.set_done_by_index(0, true).expect("mark new first");

    let reloaded = TaskRepository::load(storage);

    assert_eq!(reloaded.get_all(), repository.get_all());
    assert!(reloaded.get_by_index(0).is_ok_and(Task::is_done));
}
