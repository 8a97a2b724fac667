use crate::errors::{AppError, AppResult};
use crate::models::event::AttendanceEvent;
use crate::models::event_type::EventType;
use crate::models::position::Position;
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};
use serde::Serialize;

const EVENT_COLUMNS: &str =
    "id, user_id, kind, timestamp, day, x, y, user_agent, ip_address, notes, created_at";

/// Which ledger entries exist for one (user, day).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayState {
    pub checked_in: bool,
    pub checked_out: bool,
}

pub fn map_row(row: &Row) -> Result<AttendanceEvent> {
    let day_str: String = row.get("day")?;
    let day = NaiveDate::parse_from_str(&day_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(day_str.clone())),
        )
    })?;

    let kind_str: String = row.get("kind")?;
    let kind = EventType::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidEventType(kind_str.clone())),
        )
    })?;

    let x: Option<String> = row.get("x")?;
    let y: Option<String> = row.get("y")?;
    let position = match (x, y) {
        (Some(x), Some(y)) => Some(Position { x, y }),
        _ => None,
    };

    Ok(AttendanceEvent {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        kind,
        timestamp: row.get("timestamp")?,
        day,
        position,
        user_agent: row.get("user_agent")?,
        ip_address: row.get("ip_address")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

/// Append an event and return its id. A second event of the same kind for
/// the same (user, day) is rejected by the unique index and surfaces as
/// `DuplicateEvent`.
pub fn insert_event(conn: &Connection, ev: &AttendanceEvent) -> AppResult<i64> {
    let (x, y) = match &ev.position {
        Some(p) => (Some(p.x.as_str()), Some(p.y.as_str())),
        None => (None, None),
    };

    conn.execute(
        "INSERT INTO attendance_events
            (user_id, kind, timestamp, day, x, y, user_agent, ip_address, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            ev.user_id,
            ev.kind.to_db_str(),
            ev.timestamp,
            ev.day_str(),
            x,
            y,
            ev.user_agent,
            ev.ip_address,
            ev.notes,
            ev.created_at,
        ],
    )
    .map_err(|e| {
        if super::is_unique_violation(&e) {
            AppError::DuplicateEvent {
                user_id: ev.user_id.clone(),
                day: ev.day_str(),
                kind: ev.kind.label().to_string(),
            }
        } else {
            AppError::Db(e)
        }
    })?;

    Ok(conn.last_insert_rowid())
}

pub fn day_state(conn: &Connection, user_id: &str, day: &NaiveDate) -> AppResult<DayState> {
    let mut stmt = conn.prepare_cached(
        "SELECT kind FROM attendance_events WHERE user_id = ?1 AND day = ?2",
    )?;
    let day_str = day.format("%Y-%m-%d").to_string();
    let rows = stmt.query_map(params![user_id, day_str], |row| row.get::<_, String>(0))?;

    let mut state = DayState::default();
    for r in rows {
        match EventType::from_db_str(&r?) {
            Some(EventType::CheckIn) => state.checked_in = true,
            Some(EventType::CheckOut) => state.checked_out = true,
            None => {}
        }
    }
    Ok(state)
}

/// Events with `start <= timestamp < end`, newest first. `user_id = None`
/// returns every user's events.
pub fn query_events(
    conn: &Connection,
    user_id: Option<&str>,
    start: i64,
    end: i64,
) -> AppResult<Vec<AttendanceEvent>> {
    let mut out = Vec::new();

    match user_id {
        Some(uid) => {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {EVENT_COLUMNS} FROM attendance_events
                 WHERE user_id = ?1 AND timestamp >= ?2 AND timestamp < ?3
                 ORDER BY timestamp DESC, id DESC"
            ))?;
            let rows = stmt.query_map(params![uid, start, end], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {EVENT_COLUMNS} FROM attendance_events
                 WHERE timestamp >= ?1 AND timestamp < ?2
                 ORDER BY timestamp DESC, id DESC"
            ))?;
            let rows = stmt.query_map(params![start, end], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn find_event(conn: &Connection, id: i64) -> AppResult<Option<AttendanceEvent>> {
    use rusqlite::OptionalExtension;

    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_COLUMNS} FROM attendance_events WHERE id = ?1"
    ))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn delete_event(conn: &Connection, id: i64) -> AppResult<()> {
    let n = conn.execute("DELETE FROM attendance_events WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::NotFound(format!("Attendance event {id}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{meta, seed, ts};

    fn event(user_id: &str, kind: EventType, day: u32) -> AttendanceEvent {
        let d = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let at = ts(2025, 3, day, 9, 0);
        AttendanceEvent::new(user_id, kind, at, d, None, &meta(), at)
    }

    #[test]
    fn second_check_in_same_day_is_a_duplicate() {
        let (pool, _admin, user) = seed();
        insert_event(&pool.conn, &event(&user.id, EventType::CheckIn, 3)).unwrap();

        let err = insert_event(&pool.conn, &event(&user.id, EventType::CheckIn, 3)).unwrap_err();
        assert!(matches!(err, AppError::DuplicateEvent { .. }));

        // a different day is fine
        insert_event(&pool.conn, &event(&user.id, EventType::CheckIn, 4)).unwrap();
    }

    #[test]
    fn check_out_without_check_in_is_refused_by_storage() {
        let (pool, _admin, user) = seed();
        let err = insert_event(&pool.conn, &event(&user.id, EventType::CheckOut, 3)).unwrap_err();
        assert!(matches!(err, AppError::Db(_)));

        let d = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(day_state(&pool.conn, &user.id, &d).unwrap(), DayState::default());
    }

    #[test]
    fn find_and_delete_round_trip() {
        let (pool, _admin, user) = seed();
        let id = insert_event(&pool.conn, &event(&user.id, EventType::CheckIn, 3)).unwrap();

        let found = find_event(&pool.conn, id).unwrap().unwrap();
        assert_eq!(found.kind, EventType::CheckIn);
        assert_eq!(found.ip_address, "10.0.0.1");

        delete_event(&pool.conn, id).unwrap();
        assert!(find_event(&pool.conn, id).unwrap().is_none());
        assert!(matches!(delete_event(&pool.conn, id), Err(AppError::NotFound(_))));
    }
}
