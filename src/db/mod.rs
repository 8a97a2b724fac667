pub mod events;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod sites;
pub mod users;

use rusqlite::ErrorCode;

/// True when `err` is a UNIQUE / PRIMARY KEY constraint violation.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}
