pub mod commands;
pub mod parser;

use crate::config::Config;
use crate::core::access::authenticate;
use crate::core::clock::{Clock, FixedClock, SystemClock};
use crate::core::policy::Policy;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::request::RequestMeta;
use crate::models::user::User;
use parser::{Cli, MetaArgs};

/// Per-invocation context shared by the command handlers: who is calling
/// and what time it is.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<String>,
    pub now: Option<i64>,
}

impl Session {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            user: cli.user.clone(),
            now: cli.now,
        }
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.now {
            Some(ms) => Box::new(FixedClock(ms)),
            None => Box::new(SystemClock),
        }
    }

    /// Open the configured database and resolve the caller.
    pub fn open(&self, cfg: &Config) -> AppResult<(DbPool, User)> {
        let pool = open_pool(cfg)?;
        let caller = authenticate(&pool.conn, self.user.as_deref())?;
        Ok((pool, caller))
    }
}

/// `uid` if given, otherwise the caller's own id.
pub fn target_id<'a>(caller: &'a User, uid: Option<&'a str>) -> &'a str {
    uid.unwrap_or(caller.id.as_str())
}

pub fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    Ok(DbPool::with_busy_timeout(&cfg.database, cfg.busy_timeout_ms)?)
}

pub fn policy(cfg: &Config) -> AppResult<Policy> {
    Policy::from_config(cfg)
}

impl From<&MetaArgs> for RequestMeta {
    fn from(args: &MetaArgs) -> Self {
        RequestMeta::from_headers(
            args.user_agent.as_deref(),
            args.forwarded_for.as_deref(),
            args.real_ip.as_deref(),
        )
    }
}
