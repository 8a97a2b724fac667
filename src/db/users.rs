use crate::errors::{AppError, AppResult};
use crate::models::user::{Account, Registration, User};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, name, email, email_verified, picture, disabled, admin, created_at";

fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        email_verified: row.get::<_, Option<i32>>("email_verified")?.map(|v| v == 1),
        picture: row.get("picture")?,
        disabled: row.get::<_, i32>("disabled")? == 1,
        admin: row.get::<_, i32>("admin")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn find_user(conn: &Connection, id: &str) -> AppResult<Option<User>> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_user).optional()?)
}

pub fn get_user(conn: &Connection, id: &str) -> AppResult<User> {
    find_user(conn, id)?.ok_or_else(|| AppError::NotFound(format!("User {id}")))
}

pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, name ASC"
    ))?;
    let rows = stmt.query_map([], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_users(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?)
}

pub fn find_account(
    conn: &Connection,
    provider: &str,
    provider_account_id: &str,
) -> AppResult<Option<Account>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, provider, provider_account_id FROM accounts
         WHERE provider = ?1 AND provider_account_id = ?2",
    )?;
    let account = stmt
        .query_row(params![provider, provider_account_id], |row| {
            Ok(Account {
                id: row.get(0)?,
                user_id: row.get(1)?,
                provider: row.get(2)?,
                provider_account_id: row.get(3)?,
            })
        })
        .optional()?;
    Ok(account)
}

/// Insert a user and its provider account. Callers wrap this in a
/// transaction so that a user never exists without its account.
pub fn insert_user_with_account(
    conn: &Connection,
    reg: &Registration,
    admin: bool,
) -> AppResult<User> {
    let now = Utc::now().to_rfc3339();
    let user_id = Uuid::new_v4().to_string();

    conn.execute(
        "INSERT INTO users (id, name, email, email_verified, picture, disabled, admin, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7)",
        params![
            user_id,
            reg.name,
            reg.email,
            reg.email_verified.map(|v| if v { 1 } else { 0 }),
            reg.picture,
            if admin { 1 } else { 0 },
            now,
        ],
    )
    .map_err(|e| {
        if super::is_unique_violation(&e) {
            AppError::InvalidUser(format!("email '{}' is already registered", reg.email))
        } else {
            AppError::Db(e)
        }
    })?;

    conn.execute(
        "INSERT INTO accounts (id, user_id, provider, provider_account_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            Uuid::new_v4().to_string(),
            user_id,
            reg.provider,
            reg.provider_account_id,
            now,
        ],
    )?;

    get_user(conn, &user_id)
}

pub fn update_name(conn: &Connection, id: &str, name: &str) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE users SET name = ?1, updated_at = ?2 WHERE id = ?3",
        params![name, Utc::now().to_rfc3339(), id],
    )?;
    ensure_touched(n, id)
}

pub fn set_disabled(conn: &Connection, id: &str, disabled: bool) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE users SET disabled = ?1, updated_at = ?2 WHERE id = ?3",
        params![if disabled { 1 } else { 0 }, Utc::now().to_rfc3339(), id],
    )?;
    ensure_touched(n, id)
}

pub fn set_admin(conn: &Connection, id: &str, admin: bool) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE users SET admin = ?1, updated_at = ?2 WHERE id = ?3",
        params![if admin { 1 } else { 0 }, Utc::now().to_rfc3339(), id],
    )?;
    ensure_touched(n, id)
}

fn ensure_touched(rows: usize, id: &str) -> AppResult<()> {
    if rows == 0 {
        return Err(AppError::NotFound(format!("User {id}")));
    }
    Ok(())
}
