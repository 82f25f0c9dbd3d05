//! Task entity.

use chrono::NaiveDateTime;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{TaskError, TaskId, TaskKind, TaskResult, TimeFrame};
use crate::datetime::{DateTimeError, ExpectedDates, extract};

const DONE_ICON: char = '✓';
const NOT_DONE_ICON: char = '✘';

/// A unit of work tracked by the user.
///
/// Equality is structural: two tasks are equal when kind, details, and time
/// frame match. Identity, the done flag, and the recurring flag are ignored.
/// Compare [`Task::id`] explicitly when identity matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "PersistedTaskData", try_from = "PersistedTaskData")]
pub struct Task {
    id: TaskId,
    kind: TaskKind,
    details: String,
    time_frame: TimeFrame,
    done: bool,
    recurring: bool,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTaskData {
    /// Persisted task identity.
    pub id: TaskId,
    /// Persisted task kind.
    pub kind: TaskKind,
    /// Persisted description.
    pub details: String,
    /// Persisted start bound, if any.
    pub start: Option<NaiveDateTime>,
    /// Persisted end bound, if any.
    pub end: Option<NaiveDateTime>,
    /// Persisted completion flag.
    #[serde(default)]
    pub done: bool,
    /// Persisted recurring flag.
    #[serde(default)]
    pub recurring: bool,
}

impl Task {
    /// Creates a task from explicit parts with a fresh identity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IncompatibleTimeFrame`] when the time frame shape
    /// is illegal for `kind`, or [`TaskError::EmptyDetails`] when `details`
    /// is blank.
    pub fn new(
        kind: TaskKind,
        details: impl Into<String>,
        time_frame: TimeFrame,
    ) -> TaskResult<Self> {
        let details = normalize_details(kind, details.into())?;
        ensure_compatible(kind, &time_frame)?;

        Ok(Self {
            id: TaskId::new(),
            kind,
            details,
            time_frame,
            done: false,
            recurring: false,
        })
    }

    /// Creates a task of `kind` from raw user text, extracting the dates the
    /// kind expects and keeping the remaining text as details.
    ///
    /// Event text is first searched for a start/end pair and falls back to a
    /// single instant when no pair can be located.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::DateTime`] when the dates cannot be located or
    /// parsed, and the errors of [`Task::new`] for the resulting parts.
    pub fn create(kind: TaskKind, raw_details: &str, clock: &impl Clock) -> TaskResult<Self> {
        let extraction = match extract(raw_details, kind.expected_dates(), clock) {
            Err(DateTimeError::Extraction { .. }) if kind == TaskKind::Event => {
                extract(raw_details, ExpectedDates::One, clock)?
            }
            other => other?,
        };
        let time_frame = time_frame_for(kind, &extraction.date_times)?;
        Self::new(kind, extraction.residual, time_frame)
    }

    /// Reconstructs a task from persisted storage, keeping its identity.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`Task::new`] when the stored data
    /// violates the kind's rules.
    pub fn from_persisted(data: PersistedTaskData) -> TaskResult<Self> {
        let time_frame = TimeFrame::new(data.start, data.end);
        let details = normalize_details(data.kind, data.details)?;
        ensure_compatible(data.kind, &time_frame)?;

        Ok(Self {
            id: data.id,
            kind: data.kind,
            details,
            time_frame,
            done: data.done,
            recurring: data.recurring,
        })
    }

    /// Returns the task identity.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task kind.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Returns the description text.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Returns the time frame.
    #[must_use]
    pub const fn time_frame(&self) -> &TimeFrame {
        &self.time_frame
    }

    /// Returns `true` when the task is complete.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Returns `true` when the task repeats.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.recurring
    }

    /// Sets the completion flag.
    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    /// Returns the task with its recurring flag set to `recurring`.
    #[must_use]
    pub fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    /// Replaces the time frame.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IncompatibleTimeFrame`] when the new shape is
    /// illegal for this task's kind; the task is left unchanged.
    pub fn set_time_frame(&mut self, time_frame: TimeFrame) -> TaskResult<()> {
        ensure_compatible(self.kind, &time_frame)?;
        self.time_frame = time_frame;
        Ok(())
    }

    /// Copies details, time frame, and recurring flag from `replacement`,
    /// keeping this task's identity and done flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::KindChange`] when `replacement` has another kind.
    pub fn revise_from(&mut self, replacement: &Self) -> TaskResult<()> {
        if replacement.kind != self.kind {
            return Err(TaskError::KindChange {
                expected: self.kind,
                found: replacement.kind,
            });
        }
        self.set_time_frame(replacement.time_frame)?;
        self.details.clone_from(&replacement.details);
        self.recurring = replacement.recurring;
        Ok(())
    }

    /// Renders the task as `[K][✓|✘] details (time frame)`.
    #[must_use]
    pub fn description(&self) -> String {
        let icon = if self.done { DONE_ICON } else { NOT_DONE_ICON };
        let summary = format!("[{}][{icon}] {}", self.kind.code(), self.details);
        match self.time_frame.description() {
            Some(time_frame) => format!("{summary} ({time_frame})"),
            None => summary,
        }
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.details == other.details
            && self.time_frame == other.time_frame
    }
}

impl Eq for Task {}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl From<Task> for PersistedTaskData {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            kind: task.kind,
            details: task.details,
            start: task.time_frame.start(),
            end: task.time_frame.end(),
            done: task.done,
            recurring: task.recurring,
        }
    }
}

impl TryFrom<PersistedTaskData> for Task {
    type Error = TaskError;

    fn try_from(data: PersistedTaskData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

fn time_frame_for(kind: TaskKind, dates: &[NaiveDateTime]) -> TaskResult<TimeFrame> {
    match (kind, dates) {
        (TaskKind::ToDo, []) => Ok(TimeFrame::unbounded()),
        (TaskKind::Deadline, [end]) => Ok(TimeFrame::ending(*end)),
        (TaskKind::DoAfter, [start]) => Ok(TimeFrame::starting(*start)),
        (TaskKind::Event, [instant]) => Ok(TimeFrame::at(*instant)),
        (TaskKind::Event, [start, end]) => Ok(TimeFrame::between(*start, *end)),
        _ => Err(TaskError::IncompatibleTimeFrame { kind }),
    }
}

fn normalize_details(kind: TaskKind, details: String) -> TaskResult<String> {
    let trimmed = details.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyDetails { kind });
    }
    if trimmed.len() == details.len() {
        return Ok(details);
    }
    Ok(trimmed.to_owned())
}

fn ensure_compatible(kind: TaskKind, time_frame: &TimeFrame) -> TaskResult<()> {
    if kind.is_time_frame_compatible(time_frame) {
        Ok(())
    } else {
        Err(TaskError::IncompatibleTimeFrame { kind })
    }
}
