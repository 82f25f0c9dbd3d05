//! Closed set of task kinds and their time frame rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ParseTaskKindError, TimeFrame};
use crate::datetime::ExpectedDates;

/// Category of a task, fixing its time frame shape for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Plain task with no dates.
    ToDo,
    /// Task due by an end instant.
    Deadline,
    /// Task that can only start after a start instant.
    DoAfter,
    /// Task happening at an instant or across a range.
    Event,
}

impl TaskKind {
    /// Returns the one-character tag shown in task descriptions.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::ToDo => 'T',
            Self::Deadline => 'D',
            Self::DoAfter => 'A',
            Self::Event => 'E',
        }
    }

    /// Returns how many date/time values task creation extracts first.
    ///
    /// Events accept one or two values; two are tried before one.
    #[must_use]
    pub const fn expected_dates(self) -> ExpectedDates {
        match self {
            Self::ToDo => ExpectedDates::None,
            Self::Deadline | Self::DoAfter => ExpectedDates::One,
            Self::Event => ExpectedDates::Two,
        }
    }

    /// Returns `true` when `time_frame` has the shape this kind requires.
    #[must_use]
    pub fn is_time_frame_compatible(self, time_frame: &TimeFrame) -> bool {
        match (self, time_frame.start(), time_frame.end()) {
            (Self::ToDo, None, None)
            | (Self::Deadline, None, Some(_))
            | (Self::DoAfter, Some(_), None) => true,
            (Self::Event, Some(start), Some(end)) => start <= end,
            _ => false,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ToDo => "to-do",
            Self::Deadline => "deadline",
            Self::DoAfter => "do-after",
            Self::Event => "event",
        };
        f.write_str(label)
    }
}

impl TryFrom<&str> for TaskKind {
    type Error = ParseTaskKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "to_do" | "todo" => Ok(Self::ToDo),
            "deadline" => Ok(Self::Deadline),
            "do_after" | "doafter" => Ok(Self::DoAfter),
            "event" => Ok(Self::Event),
            _ => Err(ParseTaskKindError(value.to_owned())),
        }
    }
}
