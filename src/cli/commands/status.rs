use crate::cli::parser::Commands;
use crate::cli::{Session, policy};
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::ui::messages::{field, header};
use crate::utils::colors::{GREEN, GREY, RESET};
use serde_json::json;

fn mark(done: bool) -> String {
    if done {
        format!("{GREEN}yes{RESET}")
    } else {
        format!("{GREY}no{RESET}")
    }
}

/// Handle the `status` command: today's check-in/check-out state.
pub fn handle(cmd: &Commands, cfg: &Config, session: &Session) -> AppResult<()> {
    if let Commands::Status { json } = cmd {
        let policy = policy(cfg)?;
        let clock = session.clock();
        let (pool, caller) = session.open(cfg)?;

        let (window, state) =
            ReportLogic::today_status(&pool.conn, &policy, clock.as_ref(), &caller.id)?;

        if *json {
            let body = json!({
                "user_id": caller.id,
                "day": window.day.to_string(),
                "checked_in": state.checked_in,
                "checked_out": state.checked_out,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
            return Ok(());
        }

        header(format!("Attendance on {}", window.day));
        field("checked in", mark(state.checked_in));
        field("checked out", mark(state.checked_out));
    }

    Ok(())
}
