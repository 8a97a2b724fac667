//! Read-only views over the ledger.

use crate::core::access::{require_admin, require_self_or_admin};
use crate::core::clock::{Clock, DayWindow, TimeRange};
use crate::core::policy::Policy;
use crate::db::events::{DayState, day_state, query_events};
use crate::db::users::get_user;
use crate::errors::AppResult;
use crate::models::event::AttendanceEvent;
use crate::models::user::User;
use rusqlite::Connection;

pub struct ReportLogic;

impl ReportLogic {
    /// One user's events in `range`, newest first. Users may read their
    /// own ledger; admins may read anyone's.
    pub fn events_for_user(
        conn: &Connection,
        caller: &User,
        user_id: &str,
        range: TimeRange,
    ) -> AppResult<Vec<AttendanceEvent>> {
        require_self_or_admin(caller, user_id, "read another user's attendance")?;
        get_user(conn, user_id)?;
        query_events(conn, Some(user_id), range.start, range.end)
    }

    /// Every user's events in `range`, newest first. Admin only.
    pub fn all_events(
        conn: &Connection,
        caller: &User,
        range: TimeRange,
    ) -> AppResult<Vec<AttendanceEvent>> {
        require_admin(caller, "read the whole ledger")?;
        query_events(conn, None, range.start, range.end)
    }

    /// Whether the user has checked in / out today.
    pub fn today_status(
        conn: &Connection,
        policy: &Policy,
        clock: &dyn Clock,
        user_id: &str,
    ) -> AppResult<(DayWindow, DayState)> {
        let window = DayWindow::containing(clock.now_millis(), policy.offset)?;
        let state = day_state(conn, user_id, &window.day)?;
        Ok((window, state))
    }
}
