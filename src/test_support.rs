//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock pinned to noon on a fixed local date.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    pub(crate) fn on(year: i32, month: u32, day: u32) -> Self {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid fixed clock date");
        let now = Local
            .from_local_datetime(&naive)
            .earliest()
            .expect("noon exists in the local time zone");
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
pub(crate) fn clock() -> FixedClock {
    FixedClock::on(2024, 11, 27)
}

pub(crate) fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid test instant")
}
