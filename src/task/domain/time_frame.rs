//! Optional start/end bounds attached to a task.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::datetime::format_date_time;

/// Pair of optional instants bounding when a task happens.
///
/// Which bounds may be absent is decided by the owning task's kind, not by
/// the time frame itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeFrame {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl TimeFrame {
    /// Creates a time frame from raw bounds.
    #[must_use]
    pub const fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// Time frame with neither bound.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    /// Time frame ending at `end`.
    #[must_use]
    pub const fn ending(end: NaiveDateTime) -> Self {
        Self::new(None, Some(end))
    }

    /// Time frame starting at `start`.
    #[must_use]
    pub const fn starting(start: NaiveDateTime) -> Self {
        Self::new(Some(start), None)
    }

    /// Time frame pinned to a single instant.
    #[must_use]
    pub const fn at(instant: NaiveDateTime) -> Self {
        Self::new(Some(instant), Some(instant))
    }

    /// Time frame spanning `start` to `end`.
    #[must_use]
    pub const fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Returns the start bound.
    #[must_use]
    pub const fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    /// Returns the end bound.
    #[must_use]
    pub const fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    /// Returns the earliest defined bound, used for chronological sorting.
    #[must_use]
    pub fn earliest(&self) -> Option<NaiveDateTime> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(start.min(end)),
            (start, end) => start.or(end),
        }
    }

    /// Returns the human-readable description, or `None` for an unbounded
    /// time frame.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        match (self.start, self.end) {
            (None, None) => None,
            (None, Some(end)) => Some(format!("by: {}", format_date_time(end))),
            (Some(start), None) => Some(format!("after: {}", format_date_time(start))),
            (Some(start), Some(end)) if start == end => {
                Some(format!("at: {}", format_date_time(start)))
            }
            (Some(start), Some(end)) => Some(format!(
                "from: {} to: {}",
                format_date_time(start),
                format_date_time(end)
            )),
        }
    }

    /// Orders time frames chronologically; unbounded frames sort last.
    #[must_use]
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        match (self.earliest(), other.earliest()) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
