use crate::db::users::find_user;
use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use rusqlite::Connection;
use tracing::warn;

/// Resolve the identity handed over by the identity provider. The id is
/// trusted as-is; it only has to name an existing user.
pub fn authenticate(conn: &Connection, user_id: Option<&str>) -> AppResult<User> {
    let id = user_id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Unauthorized("pass --user <id>".into()))?;

    find_user(conn, id)?.ok_or_else(|| {
        warn!(user_id = id, "unknown caller");
        AppError::Unauthorized(format!("unknown user {id}"))
    })
}

pub fn require_admin(caller: &User, action: &str) -> AppResult<()> {
    if !caller.admin {
        warn!(user_id = %caller.id, action, "admin-only action refused");
        return Err(AppError::Forbidden(action.to_string()));
    }
    Ok(())
}

pub fn require_self_or_admin(caller: &User, target_id: &str, action: &str) -> AppResult<()> {
    if caller.id == target_id {
        return Ok(());
    }
    require_admin(caller, action)
}
