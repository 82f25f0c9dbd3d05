//! Free-text date/time extraction for task descriptions.
//!
//! Task input embeds zero, one, or two date/time tokens in otherwise
//! unstructured text (`"submit report 2/12/2024 1800"`). This module locates
//! those tokens, parses them into wall-clock instants, and returns the text
//! that remains once they are removed.
//!
//! - [`parse_token`] parses a single canonical token.
//! - [`extract`] locates and parses the tokens a task kind expects.
//!
//! The rightmost match is always authoritative: a date typed after the
//! description wins over anything that merely looks like a date earlier on.

mod error;
mod extractor;
mod token;

pub use error::{DateTimeError, DateTimeResult};
pub use extractor::{ExpectedDates, Extraction, extract};
pub use token::{format_date_time, parse_token};
