//! Canonical date/time token grammar.
//!
//! A token is either a numeric date `D[/.-]M[/.-]Y` or a weekday name (full
//! or abbreviated), optionally followed by a single space and a 24-hour
//! `HHmm` time. Two-digit years are read as `20YY`; a missing time means
//! midnight.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use mockable::Clock;
use regex::Regex;

use super::{DateTimeError, DateTimeResult};

/// Unanchored token pattern without capture groups, so it can be composed
/// into the pair patterns used by the extractor.
pub(super) const TOKEN_PATTERN: &str = concat!(
    r"(?:\b\d{1,2}[./-]\d{1,2}[./-](?:\d{4}|\d{2})\b",
    r"|\b(?:monday|mon|tuesday|tues|tue|wednesday|wed|thursday|thurs|thu|friday|fri",
    r"|saturday|sat|sunday|sun)\b)",
    r"(?:\s\d{4}\b)?",
);

const DISPLAY_FORMAT: &str = "%b %d %Y, %a, %H:%M";

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static CANONICAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:(?P<day>\d{1,2})[./-](?P<month>\d{1,2})[./-](?P<year>\d{4}|\d{2})",
        r"|(?P<weekday>[a-z]+))",
        r"(?:\s+(?P<time>\d{4}))?$",
    ))
    .expect("canonical token regex is valid")
});

/// Parses a single canonical date/time token.
///
/// Weekday tokens resolve to the nearest occurrence on or after the current
/// local date reported by `clock`, so `"mon"` on a Monday means today.
///
/// # Errors
///
/// Returns [`DateTimeError::Malformed`] when the token does not follow the
/// grammar, names an unknown weekday, or carries an out-of-range day, month,
/// hour, or minute.
pub fn parse_token(token: &str, clock: &impl Clock) -> DateTimeResult<NaiveDateTime> {
    let trimmed = token.trim();
    let captures = CANONICAL_TOKEN
        .captures(trimmed)
        .ok_or_else(|| DateTimeError::malformed(trimmed, "unrecognised date format"))?;

    let date = if let Some(weekday) = captures.name("weekday") {
        resolve_weekday(trimmed, weekday.as_str(), clock)?
    } else {
        let day = parse_component(trimmed, captures.name("day").map(|m| m.as_str()))?;
        let month = parse_component(trimmed, captures.name("month").map(|m| m.as_str()))?;
        let year_text = captures.name("year").map_or("", |m| m.as_str());
        let year = parse_year(trimmed, year_text)?;
        calendar_date(trimmed, year, month, day)?
    };

    let time = match captures.name("time") {
        Some(time) => parse_time(trimmed, time.as_str())?,
        None => NaiveTime::MIN,
    };

    Ok(date.and_time(time))
}

/// Formats an instant the way task descriptions display it,
/// e.g. `Dec 02 2024, Mon, 18:00`.
#[must_use]
pub fn format_date_time(value: NaiveDateTime) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

fn parse_component(token: &str, text: Option<&str>) -> DateTimeResult<u32> {
    text.unwrap_or_default()
        .parse::<u32>()
        .map_err(|_| DateTimeError::malformed(token, "expected a numeric date component"))
}

fn parse_year(token: &str, text: &str) -> DateTimeResult<i32> {
    let year = text
        .parse::<i32>()
        .map_err(|_| DateTimeError::malformed(token, "expected a numeric year"))?;
    if text.len() == 2 {
        return Ok(2000 + year);
    }
    Ok(year)
}

fn calendar_date(token: &str, year: i32, month: u32, day: u32) -> DateTimeResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(DateTimeError::malformed(
            token,
            format!("month {month} is out of range"),
        ));
    }
    if !(1..=31).contains(&day) {
        return Err(DateTimeError::malformed(
            token,
            format!("day {day} is out of range"),
        ));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DateTimeError::malformed(token, format!("day {day} does not exist in month {month}"))
    })
}

fn parse_time(token: &str, text: &str) -> DateTimeResult<NaiveTime> {
    let (hour_text, minute_text) = text
        .split_at_checked(2)
        .ok_or_else(|| DateTimeError::malformed(token, "time must be written as HHmm"))?;
    let hour = parse_component(token, Some(hour_text))?;
    let minute = parse_component(token, Some(minute_text))?;
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| DateTimeError::malformed(token, format!("time {text} is out of range")))
}

fn resolve_weekday(token: &str, name: &str, clock: &impl Clock) -> DateTimeResult<NaiveDate> {
    let target = weekday_from_name(name)
        .ok_or_else(|| DateTimeError::malformed(token, format!("unknown weekday '{name}'")))?;
    let today = clock.local().date_naive();
    today
        .iter_days()
        .take(7)
        .find(|date| date.weekday() == target)
        .ok_or_else(|| DateTimeError::malformed(token, "weekday falls outside the calendar"))
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_ascii_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}
