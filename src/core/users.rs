use crate::core::access::{require_admin, require_self_or_admin};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::users::{
    count_users, find_account, get_user, insert_user_with_account, list_users, set_admin,
    set_disabled, update_name,
};
use crate::errors::{AppError, AppResult};
use crate::models::user::{Registration, User, validate_name};
use rusqlite::Connection;
use tracing::info;

pub struct UserLogic;

impl UserLogic {
    /// Sign-in callback: return the user linked to the provider account,
    /// creating user and account together on first sign-in. The first user
    /// ever registered is made an administrator.
    pub fn register(pool: &mut DbPool, reg: Registration) -> AppResult<(User, bool)> {
        let reg = reg.validated()?;

        let tx = pool.write_tx()?;
        if let Some(account) = find_account(&tx, &reg.provider, &reg.provider_account_id)? {
            let user = get_user(&tx, &account.user_id)?;
            return Ok((user, false));
        }

        let bootstrap_admin = count_users(&tx)? == 0;
        let user = insert_user_with_account(&tx, &reg, bootstrap_admin)?;
        audit(
            &tx,
            "user_register",
            &user.id,
            &format!("{} <{}> via {}", user.name, user.email, reg.provider),
        )?;
        tx.commit()?;

        info!(user_id = %user.id, admin = user.admin, "user registered");
        Ok((user, true))
    }

    pub fn get(conn: &Connection, caller: &User, id: &str) -> AppResult<User> {
        require_self_or_admin(caller, id, "view another user")?;
        get_user(conn, id)
    }

    pub fn list(conn: &Connection, caller: &User) -> AppResult<Vec<User>> {
        require_admin(caller, "list users")?;
        list_users(conn)
    }

    pub fn rename(conn: &Connection, caller: &User, id: &str, name: &str) -> AppResult<User> {
        require_self_or_admin(caller, id, "rename another user")?;
        let name = validate_name(name)?;

        update_name(conn, id, &name)?;
        audit(conn, "user_rename", id, &name)?;
        get_user(conn, id)
    }

    /// Flip the disabled flag and return the updated user.
    pub fn toggle_disabled(conn: &Connection, caller: &User, id: &str) -> AppResult<User> {
        require_admin(caller, "disable users")?;
        if caller.id == id {
            return Err(AppError::Conflict("administrators cannot disable themselves".into()));
        }

        let user = get_user(conn, id)?;
        set_disabled(conn, id, !user.disabled)?;
        audit(
            conn,
            "user_disable",
            id,
            if user.disabled { "enabled" } else { "disabled" },
        )?;
        info!(user_id = id, disabled = !user.disabled, "user disabled flag toggled");
        get_user(conn, id)
    }

    pub fn set_admin(conn: &Connection, caller: &User, id: &str, admin: bool) -> AppResult<User> {
        require_admin(caller, "change administrator rights")?;
        if caller.id == id && !admin {
            return Err(AppError::Conflict("administrators cannot revoke their own rights".into()));
        }

        set_admin(conn, id, admin)?;
        audit(conn, "user_admin", id, if admin { "granted" } else { "revoked" })?;
        get_user(conn, id)
    }
}
