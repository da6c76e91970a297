//! Word domain model.
//!
//! # Responsibility
//! - Define the canonical word-pool record.
//! - Validate word text before persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another word.
//! - `text` is non-empty and immutable after creation.
//! - `date` is absent until assignment and immutable once set; there is no
//!   unassignment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for every word in the pool (SQLite rowid).
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type WordId = i64;

/// Validation failures for word text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordValidationError {
    /// Word text is empty after trimming.
    EmptyText,
}

impl Display for WordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "word text must not be empty"),
        }
    }
}

impl Error for WordValidationError {}

/// Canonical record for one word-pool entry.
///
/// The word store exclusively owns all rows; values of this type are query
/// results, never handles onto shared mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Stable integer ID assigned at insert.
    pub id: WordId,
    /// The candidate word itself. Duplicates in the pool are permitted.
    pub text: String,
    /// Calendar date this word is bound to, or `None` while still in the
    /// unassigned pool.
    pub date: Option<NaiveDate>,
}

impl Word {
    /// Checks candidate text before it enters the pool.
    ///
    /// # Errors
    /// - Returns `WordValidationError::EmptyText` for blank input.
    pub fn validate_text(text: &str) -> Result<(), WordValidationError> {
        if text.trim().is_empty() {
            return Err(WordValidationError::EmptyText);
        }
        Ok(())
    }

    /// Returns whether this word has been bound to a calendar date.
    pub fn is_assigned(&self) -> bool {
        self.date.is_some()
    }
}
