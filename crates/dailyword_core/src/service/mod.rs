//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate word-store calls into use-case level APIs.
//! - Keep transport layers decoupled from storage details.

pub mod assignment_service;
pub mod query_service;
