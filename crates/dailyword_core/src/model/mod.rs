//! Domain model for the daily word service.
//!
//! # Responsibility
//! - Define the canonical `Word` record shared by store, services, and API.
//! - Own calendar-date parsing and formatting rules.
//!
//! # Invariants
//! - Every word is identified by a stable integer `WordId`.
//! - Assignment dates are canonical `YYYY-MM-DD` values.

pub mod date;
pub mod word;
