//! geoattend library root.
//! Exposes the CLI parser, the high-level run() function and the ledger
//! modules used by it.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::Session;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let session = Session::from_cli(cli);

    match &cli.command {
        Commands::Init => commands::init::handle(cli, cfg),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Attend { .. } => commands::attend::handle(&cli.command, cfg, &session),
        Commands::Ack { .. } => commands::ack::handle(&cli.command, cfg, &session),
        Commands::List { .. } => commands::list::handle(&cli.command, cfg, &session),
        Commands::Status { .. } => commands::status::handle(&cli.command, cfg, &session),
        Commands::Calendar { .. } => commands::calendar::handle(&cli.command, cfg, &session),
        Commands::Del { .. } => commands::del::handle(&cli.command, cfg, &session),
        Commands::Site { .. } => commands::site::handle(&cli.command, cfg, &session),
        Commands::User { .. } => commands::user::handle(&cli.command, cfg, &session),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    logging::init_logging(&cfg.log_level);

    dispatch(&cli, &cfg)
}
