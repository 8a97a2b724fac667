use crate::cli::open_pool;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped with `--test`)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    cfg.check()?;

    info("Initializing geoattend…");

    if cli.test {
        info("Test mode: configuration file left untouched");
    } else {
        let path = cfg.save()?;
        info(format!("Config file : {}", path.display()));
    }
    info(format!("Database    : {}", cfg.database));

    let pool = open_pool(cfg)?;
    init_db(&pool.conn)?;

    // the audit row is informative only
    if let Err(e) = audit(
        &pool.conn,
        "init",
        "",
        &format!("Database initialized at {}", cfg.database),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
