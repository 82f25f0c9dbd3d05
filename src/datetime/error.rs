//! Error types for date/time extraction and parsing.

use thiserror::Error;

/// Result type for date/time operations.
pub type DateTimeResult<T> = Result<T, DateTimeError>;

/// Errors returned while locating or parsing date/time tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateTimeError {
    /// The text does not contain as many date/time tokens as required.
    #[error("could not locate {expected} date/time value(s) (found {found})")]
    Extraction {
        /// Number of tokens the caller asked for.
        expected: usize,
        /// Number of tokens actually located.
        found: usize,
    },

    /// A located token could not be turned into a calendar instant.
    #[error("malformed date/time '{token}': {reason}")]
    Malformed {
        /// The offending token text.
        token: String,
        /// Why the token was rejected.
        reason: String,
    },
}

impl DateTimeError {
    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            token: token.to_owned(),
            reason: reason.into(),
        }
    }
}
