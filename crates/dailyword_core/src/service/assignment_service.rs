//! Daily assignment engine.
//!
//! # Responsibility
//! - Bind one unassigned word to a calendar day, exactly once per day.
//! - Keep repeat invocations for the same day idempotent.
//!
//! # Invariants
//! - A date already holding a word is never assigned a second one.
//! - The check-then-act spans two store operations and relies on the
//!   single-writer process model; no other writer may interleave between
//!   the date lookup and the assignment.
//! - Assignment is an explicit trigger; this module owns no timer thread.

use crate::model::date::local_today;
use crate::model::word::Word;
use crate::repo::word_repo::{RepoError, RepoResult, WordRepository};
use chrono::NaiveDate;
use log::{info, warn};

/// Result of ensuring a day has a word bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// A word from the pool was bound to the day by this call.
    NewlyAssigned(Word),
    /// The day already had a word; nothing was written.
    AlreadyAssigned(Word),
}

impl AssignmentOutcome {
    /// Returns the word bound to the day, however it got there.
    pub fn word(&self) -> &Word {
        match self {
            Self::NewlyAssigned(word) | Self::AlreadyAssigned(word) => word,
        }
    }

    /// Returns whether this call performed the assignment.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::NewlyAssigned(_))
    }
}

/// Use-case service binding words to calendar days.
pub struct AssignmentService<R: WordRepository> {
    repo: R,
}

impl<R: WordRepository> AssignmentService<R> {
    /// Creates a service using the provided word store implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Ensures the given day has a word bound to it.
    ///
    /// # Contract
    /// - Idempotent: a day that already has a word returns
    ///   `AlreadyAssigned` without writing.
    /// - Picks uniformly from the unassigned pool otherwise.
    ///
    /// # Errors
    /// - `PoolExhausted` when no unassigned words remain. Reported to the
    ///   caller, never fatal to the process.
    pub fn ensure_word_for(&self, date: NaiveDate) -> RepoResult<AssignmentOutcome> {
        if let Some(existing) = self.repo.find_by_date(date)? {
            info!(
                "event=assign_day module=service status=noop date={date} word_id={}",
                existing.id
            );
            return Ok(AssignmentOutcome::AlreadyAssigned(existing));
        }

        let mut candidate = match self.repo.find_unassigned_random()? {
            Some(word) => word,
            None => {
                warn!("event=assign_day module=service status=exhausted date={date}");
                return Err(RepoError::PoolExhausted);
            }
        };

        self.repo.assign_date(candidate.id, date)?;
        candidate.date = Some(date);

        info!(
            "event=assign_day module=service status=ok date={date} word_id={}",
            candidate.id
        );
        Ok(AssignmentOutcome::NewlyAssigned(candidate))
    }

    /// Ensures the process-local current day has a word bound to it.
    pub fn ensure_word_for_today(&self) -> RepoResult<AssignmentOutcome> {
        self.ensure_word_for(local_today())
    }
}
