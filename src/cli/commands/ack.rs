use crate::cli::parser::Commands;
use crate::cli::{Session, policy};
use crate::config::Config;
use crate::core::acknowledge::{AckLogic, AckRequest};
use crate::errors::{AppError, AppResult};
use crate::models::position::Position;
use crate::models::request::RequestMeta;
use crate::ui::messages::{field, success};
use crate::utils::date::parse_date;
use crate::utils::time::{ascending, local_millis, parse_time};

/// Handle the `ack` command (administrator acknowledgement).
///
/// The two times are taken in either order; the earlier one becomes the
/// check-in.
pub fn handle(cmd: &Commands, cfg: &Config, session: &Session) -> AppResult<()> {
    if let Commands::Ack {
        uid,
        date,
        start,
        end,
        notes,
        x,
        y,
        meta,
    } = cmd
    {
        let policy = policy(cfg)?;
        let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
        let t1 = parse_time(start).ok_or_else(|| AppError::InvalidTime(start.clone()))?;
        let t2 = parse_time(end).ok_or_else(|| AppError::InvalidTime(end.clone()))?;
        let (first, second) = ascending(t1, t2);

        let position = match (x, y) {
            (Some(x), Some(y)) => Some(Position::parse(x, y)?),
            _ => None,
        };

        let req = AckRequest {
            user_id: uid.clone(),
            check_in: local_millis(day, first, policy.offset)?,
            check_out: local_millis(day, second, policy.offset)?,
            notes: notes.clone(),
            position,
            meta: RequestMeta::from(meta),
        };

        let clock = session.clock();
        let (mut pool, caller) = session.open(cfg)?;
        let (ev_in, ev_out) = AckLogic::apply(&mut pool, &policy, clock.as_ref(), &caller, &req)?;

        success(format!("Attendance acknowledged for {} on {}", uid, ev_in.day_str()));
        field("check-in", format!("#{} {}", ev_in.id, ev_in.get_date_time(policy.offset)));
        field("check-out", format!("#{} {}", ev_out.id, ev_out.get_date_time(policy.offset)));
    }

    Ok(())
}
