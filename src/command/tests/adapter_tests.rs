//! Tests for the console adapters.

use std::io::Cursor;

use crate::command::{
    adapters::{ConsoleInput, ConsoleOutput, RecordingOutput},
    ports::{InputSource, OutputSink},
    services::CommandDispatcher,
};
use crate::task::{adapters::memory::InMemoryTaskStorage, services::TaskRepository};
use crate::test_support::{FixedClock, clock};
use rstest::rstest;

#[rstest]
fn console_input_strips_line_endings_and_reports_end() {
    let mut input = ConsoleInput::new(Cursor::new(b"todo a\r\nlist".to_vec()));

    assert_eq!(input.read_line(), Ok(Some("todo a".to_owned())));
    assert_eq!(input.read_line(), Ok(Some("list".to_owned())));
    assert_eq!(input.read_line(), Ok(None));
}

#[rstest]
fn console_input_replaces_invalid_utf8() {
    let mut input = ConsoleInput::new(Cursor::new(b"\xff\xfe bad\nlist\n".to_vec()));

    assert_eq!(
        input.read_line(),
        Ok(Some("\u{fffd}\u{fffd} bad".to_owned()))
    );
    assert_eq!(input.read_line(), Ok(Some("list".to_owned())));
}

#[rstest]
fn session_continues_past_invalid_utf8_line(clock: FixedClock) {
    let repository = TaskRepository::load(InMemoryTaskStorage::new());
    let mut dispatcher = CommandDispatcher::new(repository, clock, 20);
    let mut input = ConsoleInput::new(Cursor::new(
        b"todo a\n\xff\xfe bad\nlist\nbye\n".to_vec(),
    ));
    let mut output = RecordingOutput::new();

    dispatcher
        .run(&mut input, &mut output)
        .expect("garbled line does not end the session");

    let messages = output.messages();
    assert_eq!(messages.len(), 5);
    assert!(
        messages
            .get(2)
            .is_some_and(|message| message.starts_with("OOPS!!! "))
    );
    assert_eq!(output.last(), Some("Bye. Hope to see you again soon!"));
}

#[rstest]
fn console_output_writes_one_message_per_line() {
    let mut buffer = Vec::new();
    {
        let mut output = ConsoleOutput::new(&mut buffer);
        output.print_message("first").expect("write first");
        output.print_message("second\nline").expect("write second");
    }

    assert_eq!(buffer, b"first\nsecond\nline\n");
}
