use crate::core::clock::{Clock, DayWindow};
use crate::core::geofence::find_matching_site;
use crate::core::policy::Policy;
use crate::db::events::{day_state, insert_event};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::sites::list_sites;
use crate::db::users::get_user;
use crate::errors::{AppError, AppResult};
use crate::models::event::AttendanceEvent;
use crate::models::event_type::EventType;
use crate::models::position::Position;
use crate::models::request::RequestMeta;
use serde::Serialize;
use tracing::{error, info};

/// Result of one attend call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "event", rename_all = "snake_case")]
pub enum Outcome {
    CheckedIn(AttendanceEvent),
    CheckedOut(AttendanceEvent),
    /// The position matched no registered site; nothing was written.
    OutsideGeofence,
    /// Both events already exist for today; nothing was written.
    AlreadyCompleted,
}

impl Outcome {
    pub fn event(&self) -> Option<&AttendanceEvent> {
        match self {
            Outcome::CheckedIn(ev) | Outcome::CheckedOut(ev) => Some(ev),
            _ => None,
        }
    }
}

/// Live check-in / check-out decision.
pub struct AttendLogic;

impl AttendLogic {
    /// Record the next event of today for `user_id` if `position` is inside
    /// a registered site.
    ///
    /// The day-state read and the append run in one write transaction,
    /// so concurrent calls for the same user are serialized and the
    /// `(user, day, kind)` unique index backs it up across processes.
    pub fn apply(
        pool: &mut DbPool,
        policy: &Policy,
        clock: &dyn Clock,
        user_id: &str,
        position: &Position,
        meta: &RequestMeta,
    ) -> AppResult<Outcome> {
        let now = clock.now_millis();
        let window = DayWindow::containing(now, policy.offset)?;

        let result = Self::decide_and_append(pool, policy, now, &window, user_id, position, meta);
        if let Err(e) = &result {
            error!(user_id, day = %window.day, error = %e, "attend failed");
        }
        result
    }

    fn decide_and_append(
        pool: &mut DbPool,
        policy: &Policy,
        now: i64,
        window: &DayWindow,
        user_id: &str,
        position: &Position,
        meta: &RequestMeta,
    ) -> AppResult<Outcome> {
        let tx = pool.write_tx()?;

        let user = get_user(&tx, user_id)?;
        if user.disabled {
            return Err(AppError::UserDisabled(user.id));
        }

        let state = day_state(&tx, user_id, &window.day)?;
        let sites = list_sites(&tx)?;

        let Some(site) = find_matching_site(position, &sites, policy.geofence_radius)? else {
            info!(user_id, %position, "position outside every registered site");
            return Ok(Outcome::OutsideGeofence);
        };

        let kind = if !state.checked_in {
            EventType::CheckIn
        } else if !state.checked_out {
            EventType::CheckOut
        } else {
            info!(user_id, day = %window.day, "attendance already completed");
            return Ok(Outcome::AlreadyCompleted);
        };

        let mut ev = AttendanceEvent::new(
            user_id,
            kind,
            now,
            window.day,
            Some(position.clone()),
            meta,
            now,
        );
        ev.id = insert_event(&tx, &ev)?;

        audit(
            &tx,
            "attend",
            user_id,
            &format!("{} on {} at site {} ({})", kind, ev.day_str(), site.id, site.road_address),
        )?;
        tx.commit()?;

        info!(
            user_id,
            day = %window.day,
            event_id = ev.id,
            site_id = site.id,
            %kind,
            "attendance recorded"
        );

        Ok(match kind {
            EventType::CheckIn => Outcome::CheckedIn(ev),
            EventType::CheckOut => Outcome::CheckedOut(ev),
        })
    }
}
