//! Shared helpers for in-memory integration tests.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use taskdeck::{
    command::{
        adapters::{RecordingOutput, ScriptedInput},
        services::CommandDispatcher,
    },
    task::{
        adapters::memory::InMemoryTaskStorage,
        domain::{Task, TaskKind, TimeFrame},
        services::TaskRepository,
    },
};

/// Clock frozen at noon on a chosen local date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    /// Freezes the clock at noon on the given date.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let noon = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid clock date");
        let now = Local
            .from_local_datetime(&noon)
            .earliest()
            .expect("noon exists locally");
        Self { now }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}

/// Wednesday 27 November 2024.
#[fixture]
pub fn clock() -> FixedClock {
    FixedClock::on(2024, 11, 27)
}

/// Builds a local instant.
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid instant")
}

/// Three tasks of different kinds, in listing order.
#[fixture]
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new(TaskKind::ToDo, "read book", TimeFrame::unbounded()).expect("valid todo"),
        Task::new(
            TaskKind::Deadline,
            "submit report",
            TimeFrame::ending(at(2024, 12, 2, 18, 0)),
        )
        .expect("valid deadline"),
        Task::new(
            TaskKind::Event,
            "meeting",
            TimeFrame::between(at(2024, 1, 1, 9, 0), at(2024, 1, 1, 11, 0)),
        )
        .expect("valid event"),
    ]
}

/// Runs `lines` through a fresh dispatcher over `storage` and returns the
/// printed messages.
pub fn run_script(storage: &InMemoryTaskStorage, clock: FixedClock, lines: &[&str]) -> Vec<String> {
    let repository = TaskRepository::load(storage.clone());
    let mut dispatcher = CommandDispatcher::new(repository, clock, 20);
    let mut input = ScriptedInput::new(lines.iter().copied());
    let mut output = RecordingOutput::new();
    dispatcher
        .run(&mut input, &mut output)
        .expect("scripted session runs");
    output.messages().to_vec()
}
