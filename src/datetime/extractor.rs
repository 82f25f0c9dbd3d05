//! Locates date/time tokens in free text and strips them from it.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use mockable::Clock;
use regex::{Captures, Regex};

use super::token::TOKEN_PATTERN;
use super::{DateTimeError, DateTimeResult, parse_token};

#[expect(clippy::expect_used, reason = "patterns are compile-time constants")]
static SINGLE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i){TOKEN_PATTERN}")).expect("single token regex is valid")
});

#[expect(clippy::expect_used, reason = "patterns are compile-time constants")]
static TO_SEPARATED_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?P<start>{TOKEN_PATTERN})\s?to\s?(?P<end>{TOKEN_PATTERN})"
    ))
    .expect("to-separated pair regex is valid")
});

#[expect(clippy::expect_used, reason = "patterns are compile-time constants")]
static SPACE_SEPARATED_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?P<start>{TOKEN_PATTERN})\s(?P<end>{TOKEN_PATTERN})"
    ))
    .expect("space-separated pair regex is valid")
});

/// Number of date/time values a caller expects to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedDates {
    /// No date/time is extracted; the text is returned unchanged.
    None,
    /// A single date/time, the rightmost token in the text.
    One,
    /// A start/end pair, the rightmost pair in the text.
    Two,
}

impl ExpectedDates {
    /// Returns the expected number of values.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::None => 0,
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// Parsed date/time values plus the text left once they are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Values in left-to-right order (start before end for pairs).
    pub date_times: Vec<NaiveDateTime>,
    /// Trimmed text preceding the authoritative match.
    pub residual: String,
}

/// Extracts `expected` date/time values from `text`.
///
/// For [`ExpectedDates::One`] the last token in the text wins. For
/// [`ExpectedDates::Two`] a `<token> to <token>` pair is preferred; when
/// none exists, two tokens separated only by whitespace are accepted. Again
/// the last pair wins. Everything from the authoritative match onwards is
/// removed from the residual text.
///
/// # Errors
///
/// Returns [`DateTimeError::Extraction`] when too few tokens are located and
/// [`DateTimeError::Malformed`] when a located token is not a valid instant.
pub fn extract(
    text: &str,
    expected: ExpectedDates,
    clock: &impl Clock,
) -> DateTimeResult<Extraction> {
    match expected {
        ExpectedDates::None => Ok(Extraction {
            date_times: Vec::new(),
            residual: text.to_owned(),
        }),
        ExpectedDates::One => extract_single(text, clock),
        ExpectedDates::Two => extract_pair(text, clock),
    }
}

fn extract_single(text: &str, clock: &impl Clock) -> DateTimeResult<Extraction> {
    let last = SINGLE_TOKEN
        .find_iter(text)
        .last()
        .ok_or(DateTimeError::Extraction {
            expected: 1,
            found: 0,
        })?;
    let value = parse_token(last.as_str(), clock)?;

    Ok(Extraction {
        date_times: vec![value],
        residual: residual_before(text, last.start()),
    })
}

fn extract_pair(text: &str, clock: &impl Clock) -> DateTimeResult<Extraction> {
    let captures = last_captures(&TO_SEPARATED_PAIR, text)
        .or_else(|| last_captures(&SPACE_SEPARATED_PAIR, text))
        .ok_or_else(|| DateTimeError::Extraction {
            expected: 2,
            found: SINGLE_TOKEN.find_iter(text).count(),
        })?;

    let (Some(whole), Some(start), Some(end)) = (
        captures.get(0),
        captures.name("start"),
        captures.name("end"),
    ) else {
        return Err(DateTimeError::Extraction {
            expected: 2,
            found: 1,
        });
    };

    let start_value = parse_token(start.as_str(), clock)?;
    let end_value = parse_token(end.as_str(), clock)?;

    Ok(Extraction {
        date_times: vec![start_value, end_value],
        residual: residual_before(text, whole.start()),
    })
}

fn last_captures<'t>(pattern: &Regex, text: &'t str) -> Option<Captures<'t>> {
    pattern.captures_iter(text).last()
}

fn residual_before(text: &str, offset: usize) -> String {
    text.get(..offset).unwrap_or_default().trim().to_owned()
}
