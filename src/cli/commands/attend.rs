use crate::cli::parser::Commands;
use crate::cli::{Session, policy};
use crate::config::Config;
use crate::core::attend::{AttendLogic, Outcome};
use crate::core::clock::local_day;
use crate::errors::{AppError, AppResult};
use crate::models::position::Position;
use crate::models::request::RequestMeta;
use crate::ui::messages::{field, info, success};

/// Handle the `attend` command: check in, or check out if already in.
pub fn handle(cmd: &Commands, cfg: &Config, session: &Session) -> AppResult<()> {
    if let Commands::Attend { x, y, meta } = cmd {
        let position = Position::parse(x, y)?;
        let policy = policy(cfg)?;
        let clock = session.clock();
        let (mut pool, caller) = session.open(cfg)?;

        let outcome = AttendLogic::apply(
            &mut pool,
            &policy,
            clock.as_ref(),
            &caller.id,
            &position,
            &RequestMeta::from(meta),
        )?;

        match &outcome {
            Outcome::CheckedIn(ev) | Outcome::CheckedOut(ev) => {
                success(format!("{} recorded for {}", ev.kind.label(), caller.name));
                field("event", ev.id);
                field("time", ev.get_date_time(policy.offset));
                field("position", &position);
            }
            Outcome::OutsideGeofence => {
                info(format!(
                    "Position {} is outside every registered site; nothing recorded.",
                    position
                ));
            }
            Outcome::AlreadyCompleted => {
                let day = local_day(clock.now_millis(), policy.offset)?;
                return Err(AppError::AlreadyCompleted(day.to_string()));
            }
        }
    }

    Ok(())
}
