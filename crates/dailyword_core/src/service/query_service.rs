//! Read-only word queries.
//!
//! # Responsibility
//! - Validate external date input above the repository layer.
//! - Compose word-store lookups into query use-cases.
//!
//! # Invariants
//! - This layer performs no mutation; reading today's word never triggers
//!   an assignment.
//! - Invalid-format and not-found outcomes are distinct error kinds, never
//!   conflated.

use crate::model::date::{local_today, parse_date};
use crate::model::word::Word;
use crate::repo::word_repo::{RepoError, RepoResult, WordRepository};

/// Default number of entries returned by recency queries.
pub const RECENT_DEFAULT_LIMIT: u32 = 7;
/// Upper bound applied to caller-provided recency limits.
pub const RECENT_LIMIT_MAX: u32 = 50;

/// Use-case service for date-keyed and historical word lookups.
pub struct WordQueryService<R: WordRepository> {
    repo: R,
}

impl<R: WordRepository> WordQueryService<R> {
    /// Creates a service using the provided word store implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the word bound to the given `YYYY-MM-DD` date string.
    ///
    /// # Errors
    /// - `Date` when the input is not a canonical calendar date.
    /// - `NoWordForDate` when the date has no assignment.
    pub fn word_for_date(&self, raw: &str) -> RepoResult<Word> {
        let date = parse_date(raw)?;
        self.repo
            .find_by_date(date)?
            .ok_or(RepoError::NoWordForDate(date))
    }

    /// Returns the word bound to the process-local current day.
    ///
    /// # Contract
    /// - Pure read: an unassigned day returns `NoWordForDate` rather than
    ///   triggering an assignment.
    pub fn word_for_today(&self) -> RepoResult<Word> {
        let today = local_today();
        self.repo
            .find_by_date(today)?
            .ok_or(RepoError::NoWordForDate(today))
    }

    /// Returns the most recently assigned words, newest first.
    ///
    /// Limit defaults to 7 and clamps to 50; zero is treated as unset.
    pub fn recent_words(&self, limit: Option<u32>) -> RepoResult<Vec<Word>> {
        self.repo
            .list_assigned_desc(Some(normalize_recent_limit(limit)))
    }

    /// Returns words assigned within `[from, to]` inclusive, newest first.
    ///
    /// # Errors
    /// - `Date` when either bound is not a canonical calendar date.
    /// - `InvalidRange` when `from` is after `to`; no partial results.
    pub fn words_in_range(&self, from_raw: &str, to_raw: &str) -> RepoResult<Vec<Word>> {
        let from = parse_date(from_raw)?;
        let to = parse_date(to_raw)?;
        if from > to {
            return Err(RepoError::InvalidRange { from, to });
        }
        self.repo.list_assigned_in_range(from, to)
    }
}

fn normalize_recent_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) => RECENT_DEFAULT_LIMIT,
        Some(value) if value > RECENT_LIMIT_MAX => RECENT_LIMIT_MAX,
        Some(value) => value,
        None => RECENT_DEFAULT_LIMIT,
    }
}
