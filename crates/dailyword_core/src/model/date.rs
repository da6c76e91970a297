//! Calendar-date parsing and formatting.
//!
//! # Responsibility
//! - Validate external date input against the canonical `YYYY-MM-DD` shape.
//! - Provide the process-local "today" used by assignment and queries.
//!
//! # Invariants
//! - Only zero-padded `YYYY-MM-DD` strings parse successfully.
//! - Formatting always emits the canonical shape, so lexicographic order of
//!   persisted date text equals chronological order.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

// chrono's `%m`/`%d` accept non-padded fields, so the shape is checked first.
static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date shape pattern is valid"));

/// Rejection of a date string that is not a canonical calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    input: String,
}

impl DateParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date `{}`; expected YYYY-MM-DD", self.input)
    }
}

impl Error for DateParseError {}

/// Parses a canonical `YYYY-MM-DD` string into a calendar date.
///
/// # Errors
/// - Returns `DateParseError` when the shape is not zero-padded
///   `YYYY-MM-DD`, or when the fields do not form a real calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    if !DATE_SHAPE.is_match(raw) {
        return Err(DateParseError::new(raw));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| DateParseError::new(raw))
}

/// Formats a calendar date into the canonical `YYYY-MM-DD` shape.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Returns the process-local calendar date.
///
/// Assignment and "today" queries use this value directly; no timezone
/// handling exists beyond the process-local clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
