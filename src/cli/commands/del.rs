use crate::cli::Session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};

pub fn handle(cmd: &Commands, cfg: &Config, session: &Session) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let (mut pool, caller) = session.open(cfg)?;

        let prompt = format!("Delete attendance event #{}? This action is irreversible.", id);
        if !yes && !confirm(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let ev = DeleteLogic::apply(&mut pool, &caller, *id)?;
        success(format!(
            "Deleted {} #{} of {} on {}",
            ev.kind.label(),
            ev.id,
            ev.user_id,
            ev.day_str()
        ));
    }

    Ok(())
}
