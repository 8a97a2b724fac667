use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use tracing::info;

const REQUIRED_TABLES: &[&str] = &["log", "users", "accounts", "sites", "attendance_events"];

/// Bring the schema up to date, then make sure every ledger table is
/// present. Safe to call on an already initialized database.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let applied = run_pending_migrations(conn)?;
    if applied > 0 {
        info!(applied, "schema migrated");
    }

    for table in REQUIRED_TABLES {
        let found: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |r| r.get(0),
        )?;
        if found == 0 {
            return Err(AppError::Migration(format!("table '{table}' is missing after migration")));
        }
    }
    Ok(())
}
