//! Core domain logic for the daily word service.
//! This crate is the single source of truth for assignment invariants.

pub mod api;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date::{format_date, local_today, parse_date, DateParseError};
pub use model::word::{Word, WordId, WordValidationError};
pub use repo::word_repo::{RepoError, RepoResult, SqliteWordRepository, WordRepository};
pub use service::assignment_service::{AssignmentOutcome, AssignmentService};
pub use service::query_service::{WordQueryService, RECENT_DEFAULT_LIMIT, RECENT_LIMIT_MAX};
