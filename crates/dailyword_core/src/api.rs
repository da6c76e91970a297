//! Transport-facing operation envelopes.
//!
//! # Responsibility
//! - Expose the logical operations an HTTP router would call, with stable
//!   JSON-shaped reply bodies.
//! - Keep error semantics flat: every internal failure becomes an `{error}`
//!   body.
//!
//! # Invariants
//! - These functions never panic and never propagate errors across the
//!   seam.
//! - The connection is an explicit argument; there is no global request
//!   state. Callers own acquisition and release around each call.

use crate::model::date::format_date;
use crate::model::word::Word;
use crate::repo::word_repo::{RepoError, SqliteWordRepository};
use crate::service::assignment_service::{AssignmentOutcome, AssignmentService};
use crate::service::query_service::WordQueryService;
use rusqlite::Connection;
use serde::Serialize;

const INVALID_DATE_MESSAGE: &str = "Invalid date format. Must be YYYY-MM-DD.";
const NO_WORD_MESSAGE: &str = "No word found.";
const POOL_EXHAUSTED_MESSAGE: &str = "Word pool exhausted.";
const UP_TO_DATE_MESSAGE: &str = "Word already up to date!";

/// One assigned word as it crosses the transport seam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordBody {
    pub text: String,
    pub date: String,
}

/// Reply body for single-word lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WordReply {
    Word(WordBody),
    Error { error: String },
}

/// Reply body for word listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WordListReply {
    Words { words: Vec<WordBody> },
    Error { error: String },
}

/// Reply body for the explicit assignment trigger.
///
/// `success` is heterogeneous on purpose: `true` when this call performed
/// the assignment, a status string when the day was already covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AssignReply {
    Assigned { success: bool },
    UpToDate { success: String },
    Error { error: String },
}

/// Returns today's word, or `{error: "No word found."}` when today is
/// unassigned. Pure read; never triggers an assignment.
pub fn get_word_for_today(conn: &Connection) -> WordReply {
    match query_service(conn).and_then(|service| service.word_for_today()) {
        Ok(word) => WordReply::Word(word_body(&word)),
        Err(err) => WordReply::Error {
            error: error_message(&err),
        },
    }
}

/// Returns the word for an exact `YYYY-MM-DD` date.
pub fn get_word_for_date(conn: &Connection, raw_date: &str) -> WordReply {
    match query_service(conn).and_then(|service| service.word_for_date(raw_date)) {
        Ok(word) => WordReply::Word(word_body(&word)),
        Err(err) => WordReply::Error {
            error: error_message(&err),
        },
    }
}

/// Explicitly ensures today has a word assigned.
pub fn trigger_assignment(conn: &Connection) -> AssignReply {
    let outcome = match SqliteWordRepository::try_new(conn) {
        Ok(repo) => AssignmentService::new(repo).ensure_word_for_today(),
        Err(err) => Err(err),
    };

    match outcome {
        Ok(AssignmentOutcome::NewlyAssigned(_)) => AssignReply::Assigned { success: true },
        Ok(AssignmentOutcome::AlreadyAssigned(_)) => AssignReply::UpToDate {
            success: UP_TO_DATE_MESSAGE.to_string(),
        },
        Err(err) => AssignReply::Error {
            error: error_message(&err),
        },
    }
}

/// Returns the most recently assigned words, newest first.
pub fn get_recent_words(conn: &Connection, limit: Option<u32>) -> WordListReply {
    match query_service(conn).and_then(|service| service.recent_words(limit)) {
        Ok(words) => WordListReply::Words {
            words: words.iter().map(word_body).collect(),
        },
        Err(err) => WordListReply::Error {
            error: error_message(&err),
        },
    }
}

/// Returns words assigned within `[from, to]` inclusive, newest first.
pub fn get_words_in_range(conn: &Connection, from: &str, to: &str) -> WordListReply {
    match query_service(conn).and_then(|service| service.words_in_range(from, to)) {
        Ok(words) => WordListReply::Words {
            words: words.iter().map(word_body).collect(),
        },
        Err(err) => WordListReply::Error {
            error: error_message(&err),
        },
    }
}

fn query_service(
    conn: &Connection,
) -> Result<WordQueryService<SqliteWordRepository<'_>>, RepoError> {
    Ok(WordQueryService::new(SqliteWordRepository::try_new(conn)?))
}

fn word_body(word: &Word) -> WordBody {
    WordBody {
        text: word.text.clone(),
        date: word.date.map(format_date).unwrap_or_default(),
    }
}

fn error_message(err: &RepoError) -> String {
    match err {
        RepoError::Date(_) => INVALID_DATE_MESSAGE.to_string(),
        RepoError::NoWordForDate(_) => NO_WORD_MESSAGE.to_string(),
        RepoError::PoolExhausted => POOL_EXHAUSTED_MESSAGE.to_string(),
        other => other.to_string(),
    }
}
