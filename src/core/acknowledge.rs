use crate::core::access::require_admin;
use crate::core::clock::{Clock, local_day};
use crate::core::policy::Policy;
use crate::db::events::insert_event;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::users::get_user;
use crate::errors::{AppError, AppResult};
use crate::models::event::AttendanceEvent;
use crate::models::event_type::EventType;
use crate::models::position::Position;
use crate::models::request::RequestMeta;
use crate::models::user::User;
use serde::Deserialize;
use tracing::{error, info};

/// An administrator's retroactive check-in / check-out pair.
#[derive(Debug, Clone, Deserialize)]
pub struct AckRequest {
    pub user_id: String,
    pub check_in: i64,
    pub check_out: i64,
    pub notes: Option<String>,
    pub position: Option<Position>,
    pub meta: RequestMeta,
}

pub struct AckLogic;

impl AckLogic {
    /// Store exactly `check_in` and `check_out` for the user, both or
    /// neither. No geofence check.
    ///
    /// The pair must be ordered (`check_in <= check_out`) and fall on one
    /// local day; callers that collect two unordered times sort them first.
    pub fn apply(
        pool: &mut DbPool,
        policy: &Policy,
        clock: &dyn Clock,
        caller: &User,
        req: &AckRequest,
    ) -> AppResult<(AttendanceEvent, AttendanceEvent)> {
        require_admin(caller, "acknowledge attendance")?;

        let result = Self::write_pair(pool, policy, clock.now_millis(), caller, req);
        if let Err(e) = &result {
            error!(
                user_id = %req.user_id,
                admin = %caller.id,
                error = %e,
                "acknowledgement failed"
            );
        }
        result
    }

    fn write_pair(
        pool: &mut DbPool,
        policy: &Policy,
        now: i64,
        caller: &User,
        req: &AckRequest,
    ) -> AppResult<(AttendanceEvent, AttendanceEvent)> {
        if req.check_in > req.check_out {
            return Err(AppError::InvalidAcknowledgement(
                "check-in must not be later than check-out".into(),
            ));
        }

        let day = local_day(req.check_in, policy.offset)?;
        if local_day(req.check_out, policy.offset)? != day {
            return Err(AppError::InvalidAcknowledgement(
                "check-in and check-out must fall on the same day".into(),
            ));
        }

        let notes = req
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let tx = pool.write_tx()?;
        get_user(&tx, &req.user_id)?;

        let mut ev_in = AttendanceEvent::new(
            &req.user_id,
            EventType::CheckIn,
            req.check_in,
            day,
            req.position.clone(),
            &req.meta,
            now,
        )
        .with_notes(notes.clone());
        let mut ev_out = AttendanceEvent::new(
            &req.user_id,
            EventType::CheckOut,
            req.check_out,
            day,
            req.position.clone(),
            &req.meta,
            now,
        )
        .with_notes(notes);

        ev_in.id = insert_event(&tx, &ev_in)?;
        ev_out.id = insert_event(&tx, &ev_out)?;

        audit(
            &tx,
            "acknowledge",
            &req.user_id,
            &format!("pair on {} acknowledged by {}", ev_in.day_str(), caller.id),
        )?;
        tx.commit()?;

        info!(user_id = %req.user_id, admin = %caller.id, %day, "attendance acknowledged");
        Ok((ev_in, ev_out))
    }
}
