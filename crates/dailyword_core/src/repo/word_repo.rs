//! Word store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the durable id→word mapping, queryable by date or date range.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `assign_date` only ever moves a row from NULL to a concrete date;
//!   cross-row date uniqueness is the assignment engine's responsibility.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::date::{format_date, parse_date, DateParseError};
use crate::model::word::{Word, WordId, WordValidationError};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const WORD_SELECT_SQL: &str = "SELECT id, text, date FROM words";

const REQUIRED_TABLE: &str = "words";
const REQUIRED_COLUMNS: &[&str] = &["id", "text", "date"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Word store error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(WordValidationError),
    Db(DbError),
    Date(DateParseError),
    WordNotFound(WordId),
    NoWordForDate(NaiveDate),
    AlreadyAssigned(WordId),
    InvalidRange { from: NaiveDate, to: NaiveDate },
    PoolExhausted,
    InvalidData(String),
    UninitializedConnection { expected_version: u32, actual_version: u32 },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn { table: &'static str, column: &'static str },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Date(err) => write!(f, "{err}"),
            Self::WordNotFound(id) => write!(f, "word not found: {id}"),
            Self::NoWordForDate(date) => write!(f, "no word assigned to {date}"),
            Self::AlreadyAssigned(id) => {
                write!(f, "word {id} already has an assigned date")
            }
            Self::InvalidRange { from, to } => {
                write!(f, "invalid range: {from} is after {to}")
            }
            Self::PoolExhausted => write!(f, "word pool exhausted: no unassigned words remain"),
            Self::InvalidData(message) => write!(f, "invalid persisted word data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; apply migrations first"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Date(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WordValidationError> for RepoError {
    fn from(value: WordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<DateParseError> for RepoError {
    fn from(value: DateParseError) -> Self {
        Self::Date(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Word store interface used by the assignment engine and query service.
pub trait WordRepository {
    /// Creates one unassigned word and returns its stable id.
    fn insert_word(&self, text: &str) -> RepoResult<WordId>;
    /// Returns the word bound to the given date, if any. Zero or one row
    /// under the date-uniqueness invariant.
    fn find_by_date(&self, date: NaiveDate) -> RepoResult<Option<Word>>;
    /// Returns one uniformly random word from the unassigned pool, or `None`
    /// when the pool is exhausted.
    fn find_unassigned_random(&self) -> RepoResult<Option<Word>>;
    /// Binds a word to a date. Write-once: fails if the word already carries
    /// a date.
    fn assign_date(&self, id: WordId, date: NaiveDate) -> RepoResult<()>;
    /// Lists assigned words, newest date first, optionally truncated.
    fn list_assigned_desc(&self, limit: Option<u32>) -> RepoResult<Vec<Word>>;
    /// Lists words assigned within `[from, to]` inclusive, newest first.
    fn list_assigned_in_range(&self, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<Word>>;
}

/// SQLite-backed word store.
pub struct SqliteWordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWordRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not carry the word-pool shape this repository expects.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl WordRepository for SqliteWordRepository<'_> {
    fn insert_word(&self, text: &str) -> RepoResult<WordId> {
        Word::validate_text(text)?;

        self.conn
            .execute("INSERT INTO words (text) VALUES (?1);", [text])?;

        Ok(self.conn.last_insert_rowid())
    }

    fn find_by_date(&self, date: NaiveDate) -> RepoResult<Option<Word>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WORD_SELECT_SQL} WHERE date = ?1;"))?;

        let mut rows = stmt.query([format_date(date)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_word_row(row)?));
        }

        Ok(None)
    }

    fn find_unassigned_random(&self) -> RepoResult<Option<Word>> {
        // Uniform per call over the unassigned subset.
        let mut stmt = self.conn.prepare(&format!(
            "{WORD_SELECT_SQL} WHERE date IS NULL ORDER BY RANDOM() LIMIT 1;"
        ))?;

        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_word_row(row)?));
        }

        Ok(None)
    }

    fn assign_date(&self, id: WordId, date: NaiveDate) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE words SET date = ?1 WHERE id = ?2 AND date IS NULL;",
            params![format_date(date), id],
        )?;

        if changed == 1 {
            return Ok(());
        }

        // Zero rows changed: either the id is unknown or the row already
        // carries a date.
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM words WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if rows.next()?.is_some() {
            return Err(RepoError::AlreadyAssigned(id));
        }

        Err(RepoError::WordNotFound(id))
    }

    fn list_assigned_desc(&self, limit: Option<u32>) -> RepoResult<Vec<Word>> {
        let mut sql = format!("{WORD_SELECT_SQL} WHERE date IS NOT NULL ORDER BY date DESC, id ASC");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }
        sql.push(';');

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut words = Vec::new();

        while let Some(row) = rows.next()? {
            words.push(parse_word_row(row)?);
        }

        Ok(words)
    }

    fn list_assigned_in_range(&self, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<Word>> {
        if from > to {
            return Err(RepoError::InvalidRange { from, to });
        }

        let mut stmt = self.conn.prepare(&format!(
            "{WORD_SELECT_SQL}
             WHERE date IS NOT NULL
               AND date >= ?1
               AND date <= ?2
             ORDER BY date DESC, id ASC;"
        ))?;

        let mut rows = stmt.query(params![format_date(from), format_date(to)])?;
        let mut words = Vec::new();

        while let Some(row) = rows.next()? {
            words.push(parse_word_row(row)?);
        }

        Ok(words)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [REQUIRED_TABLE],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable(REQUIRED_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let mut rows = stmt.query([REQUIRED_TABLE])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(0)?);
    }

    for &column in REQUIRED_COLUMNS {
        if !present.iter().any(|name| name.as_str() == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: REQUIRED_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn parse_word_row(row: &Row<'_>) -> RepoResult<Word> {
    let id: WordId = row.get("id")?;

    let text: String = row.get("text")?;
    if text.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty text in words.text for id {id}"
        )));
    }

    let date = match row.get::<_, Option<String>>("date")? {
        Some(raw) => Some(parse_date(&raw).map_err(|_| {
            RepoError::InvalidData(format!("invalid date `{raw}` in words.date for id {id}"))
        })?),
        None => None,
    };

    Ok(Word { id, text, date })
}
