use crate::core::access::require_admin;
use crate::db::events::{day_state, delete_event, find_event};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::event::AttendanceEvent;
use crate::models::user::User;
use tracing::info;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove one ledger event. A check-in cannot be removed while the
    /// same day's check-out still exists; delete the check-out first.
    pub fn apply(pool: &mut DbPool, caller: &User, id: i64) -> AppResult<AttendanceEvent> {
        require_admin(caller, "delete attendance events")?;

        let tx = pool.write_tx()?;
        let ev = find_event(&tx, id)?
            .ok_or_else(|| AppError::NotFound(format!("Attendance event {id}")))?;

        if ev.kind.is_check_in() && day_state(&tx, &ev.user_id, &ev.day)?.checked_out {
            return Err(AppError::Conflict(format!(
                "check-out on {} still references this check-in",
                ev.day_str()
            )));
        }

        delete_event(&tx, id)?;
        audit(
            &tx,
            "event_del",
            &ev.user_id,
            &format!("{} on {} (event {}) deleted by {}", ev.kind, ev.day_str(), id, caller.id),
        )?;
        tx.commit()?;

        info!(event_id = id, user_id = %ev.user_id, "attendance event deleted");
        Ok(ev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::acknowledge::{AckLogic, AckRequest};
    use crate::core::clock::FixedClock;
    use crate::core::test_support::{meta, policy, seed, ts};
    use crate::db::events::query_events;

    #[test]
    fn check_out_goes_before_check_in() {
        let (mut pool, admin, user) = seed();
        let req = AckRequest {
            user_id: user.id.clone(),
            check_in: ts(2025, 3, 10, 9, 0),
            check_out: ts(2025, 3, 10, 18, 0),
            notes: None,
            position: None,
            meta: meta(),
        };
        let (ev_in, ev_out) =
            AckLogic::apply(&mut pool, &policy(), &FixedClock(0), &admin, &req).unwrap();

        assert!(matches!(
            DeleteLogic::apply(&mut pool, &user, ev_out.id),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            DeleteLogic::apply(&mut pool, &admin, ev_in.id),
            Err(AppError::Conflict(_))
        ));

        DeleteLogic::apply(&mut pool, &admin, ev_out.id).unwrap();
        DeleteLogic::apply(&mut pool, &admin, ev_in.id).unwrap();
        assert!(query_events(&pool.conn, None, 0, i64::MAX).unwrap().is_empty());

        assert!(matches!(
            DeleteLogic::apply(&mut pool, &admin, ev_in.id),
            Err(AppError::NotFound(_))
        ));
    }
}
