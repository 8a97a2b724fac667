use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};
use tracing::debug;

/// Ordered schema migrations. Each one runs at most once; applied versions
/// are recorded in `log` as `migration_applied` rows.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250301_0001_create_users",
        "Created users and accounts tables",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            email           TEXT NOT NULL UNIQUE,
            email_verified  INTEGER,
            picture         TEXT,
            disabled        INTEGER NOT NULL DEFAULT 0,
            admin           INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL,
            updated_at      TEXT
        );

        CREATE TABLE IF NOT EXISTS accounts (
            id                   TEXT PRIMARY KEY,
            user_id              TEXT NOT NULL
                REFERENCES users(id) ON DELETE CASCADE ON UPDATE CASCADE,
            provider             TEXT NOT NULL,
            provider_account_id  TEXT NOT NULL,
            created_at           TEXT NOT NULL,
            CONSTRAINT uq_accounts_provider_account UNIQUE (provider, provider_account_id)
        );

        CREATE INDEX IF NOT EXISTS idx_accounts_user ON accounts(user_id);
        "#,
    ),
    (
        "20250301_0002_create_sites",
        "Created sites table",
        r#"
        CREATE TABLE IF NOT EXISTS sites (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            road_address     TEXT NOT NULL,
            jibun_address    TEXT,
            english_address  TEXT,
            x                TEXT NOT NULL,
            y                TEXT NOT NULL,
            created_at       TEXT NOT NULL
        );
        "#,
    ),
    (
        "20250301_0003_create_attendance_events",
        "Created attendance_events ledger with one event per (user, day, kind)",
        r#"
        CREATE TABLE IF NOT EXISTS attendance_events (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      TEXT NOT NULL
                REFERENCES users(id) ON DELETE CASCADE,
            kind         TEXT NOT NULL CHECK(kind IN ('check_in','check_out')),
            timestamp    INTEGER NOT NULL,
            day          TEXT NOT NULL,
            x            TEXT,
            y            TEXT,
            user_agent   TEXT NOT NULL DEFAULT '',
            ip_address   TEXT NOT NULL DEFAULT '0.0.0.0',
            notes        TEXT,
            created_at   TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS uq_events_user_day_kind
            ON attendance_events(user_id, day, kind);
        CREATE INDEX IF NOT EXISTS idx_events_timestamp
            ON attendance_events(timestamp);
        CREATE INDEX IF NOT EXISTS idx_events_user_timestamp
            ON attendance_events(user_id, timestamp);

        CREATE TRIGGER IF NOT EXISTS trg_events_check_out_requires_check_in
        BEFORE INSERT ON attendance_events
        WHEN NEW.kind = 'check_out' AND NOT EXISTS (
            SELECT 1 FROM attendance_events
            WHERE user_id = NEW.user_id AND day = NEW.day AND kind = 'check_in'
        )
        BEGIN
            SELECT RAISE(ABORT, 'check-out without a check-in on the same day');
        END;
        "#,
    ),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, version: &str, message: &str, sql: &str) -> AppResult<()> {
    let script = format!(
        "BEGIN;\n{sql}\nINSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', '{version}', '{message}');\nCOMMIT;"
    );

    if let Err(e) = conn.execute_batch(&script) {
        // leave no half-applied migration behind
        let _ = conn.execute_batch("ROLLBACK;");
        return Err(AppError::Migration(format!("{version}: {e}")));
    }

    success(format!("Migration applied: {version} → {message}"));
    Ok(())
}

/// Run all pending migrations and return how many were applied.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for (version, message, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            debug!(version, "migration already applied");
            continue;
        }
        apply(conn, version, message, sql)?;
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_pending_migrations(&conn).unwrap(), MIGRATIONS.len());
        assert_eq!(run_pending_migrations(&conn).unwrap(), 0);

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, MIGRATIONS.len() as i64);
    }
}
