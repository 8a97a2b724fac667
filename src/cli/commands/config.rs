use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if !print_config && !check {
            info(format!("Config file: {}", Config::config_file().display()));
            return Ok(());
        }

        if *print_config {
            header("Current configuration");
            println!("{}", cfg.to_yaml()?);
        }

        if *check {
            cfg.check()?;
            success("Configuration is valid");
        }
    }

    Ok(())
}
