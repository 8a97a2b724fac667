//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Access
    // ---------------------------
    #[error("Not signed in: {0}")]
    Unauthorized(String),

    #[error("Administrator privileges required to {0}")]
    Forbidden(String),

    #[error("User {0} is disabled")]
    UserDisabled(String),

    #[error("{0} not found")]
    NotFound(String),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid UTC offset: {0}")]
    InvalidUtcOffset(String),

    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    #[error("Invalid user data: {0}")]
    InvalidUser(String),

    #[error("Invalid site data: {0}")]
    InvalidSite(String),

    // ---------------------------
    // Ledger errors
    // ---------------------------
    #[error("Attendance already completed for {0}")]
    AlreadyCompleted(String),

    #[error("A {kind} event already exists for user {user_id} on {day}")]
    DuplicateEvent {
        user_id: String,
        day: String,
        kind: String,
    },

    #[error("Invalid acknowledgement: {0}")]
    InvalidAcknowledgement(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
