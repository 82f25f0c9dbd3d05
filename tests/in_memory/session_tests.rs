//! Scripted conversations through the dispatcher loop.

use super::helpers::{FixedClock, clock, run_script};
use rstest::rstest;
use taskdeck::task::adapters::memory::InMemoryTaskStorage;

#[rstest]
fn full_session_produces_expected_transcript(clock: FixedClock) {
    let storage = InMemoryTaskStorage::new();

    let messages = run_script(
        &storage,
        clock,
        &[
            "todo read book",
            "deadline submit report 2/12/2024 1800",
            "event team sync fri 1000",
            "done 2",
            "list",
            "bye",
        ],
    );

    assert_eq!(
        messages,
        vec![
            "Hello! I'm Taskdeck.\nWhat can I do for you?",
            "Got it. I've added this task:\n  [T][✘] read book\nNow you have 1 task in the list.",
            "Got it. I've added this task:\n  [D][✘] submit report (by: Dec 02 2024, Mon, 18:00)\nNow you have 2 tasks in the list.",
            "Got it. I've added this task:\n  [E][✘] team sync (at: Nov 29 2024, Fri, 10:00)\nNow you have 3 tasks in the list.",
            "Nice! I've marked this task as done:\n  [D][✓] submit report (by: Dec 02 2024, Mon, 18:00)",
            "Here are the tasks in your list:\n\
             1. [T][✘] read book\n\
             2. [D][✓] submit report (by: Dec 02 2024, Mon, 18:00)\n\
             3. [E][✘] team sync (at: Nov 29 2024, Fri, 10:00)",
            "Bye. Hope to see you again soon!",
        ]
    );
}

#[rstest]
fn bad_input_is_reported_and_session_continues(clock: FixedClock) {
    let storage = InMemoryTaskStorage::new();

    let messages = run_script(
        &storage,
        clock,
        &[
            "deadline no date given",
            "deadline bad date 31/2/2024",
            "what",
            "todo still works",
        ],
    );

    assert_eq!(messages.len(), 5);
    assert!(
        messages
            .iter()
            .skip(1)
            .take(3)
            .all(|message| message.starts_with("OOPS!!! "))
    );
    assert!(
        messages
            .last()
            .is_some_and(|message| message.contains("still works"))
    );
    assert_eq!(
        storage
            .snapshot()
            .expect("lock")
            .map(|tasks| tasks.len()),
        Some(1)
    );
}

#[rstest]
fn session_state_survives_into_next_session(clock: FixedClock) {
    let storage = InMemoryTaskStorage::new();
    run_script(&storage, clock, &["todo a", "todo b", "delete 1", "bye"]);

    let messages = run_script(&storage, clock, &["list", "undo"]);

    assert_eq!(
        messages,
        vec![
            "Hello! I'm Taskdeck.\nWhat can I do for you?",
            "Here are the tasks in your list:\n1. [T][✘] b",
            "There is nothing to undo.",
        ]
    );
}

#[rstest]
fn edit_and_undo_round_trip(clock: FixedClock) {
    let storage = InMemoryTaskStorage::new();

    let messages = run_script(
        &storage,
        clock,
        &[
            "event party sat 2000",
            "edit 1 party 30/11/2024 1900 to 30/11/2024 2300",
            "undo",
            "list",
        ],
    );

    assert_eq!(
        messages.get(2).map(String::as_str),
        Some(
            "Got it. I've updated this task:\n  [E][✘] party (from: Nov 30 2024, Sat, 19:00 to: Nov 30 2024, Sat, 23:00)"
        )
    );
    assert_eq!(
        messages.last().map(String::as_str),
        Some("Here are the tasks in your list:\n1. [E][✘] party (at: Nov 30 2024, Sat, 20:00)")
    );
}
