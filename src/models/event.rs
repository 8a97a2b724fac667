use super::{event_type::EventType, position::Position, request::RequestMeta};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub id: i64,                      // ⇔ attendance_events.id
    pub user_id: String,              // ⇔ attendance_events.user_id
    pub kind: EventType,              // ⇔ attendance_events.kind ('check_in' | 'check_out')
    pub timestamp: i64,               // ⇔ attendance_events.timestamp (epoch millis)
    pub day: NaiveDate,               // ⇔ attendance_events.day ("YYYY-MM-DD", local)
    pub position: Option<Position>,   // ⇔ attendance_events.x / y
    pub user_agent: String,           // ⇔ attendance_events.user_agent
    pub ip_address: String,           // ⇔ attendance_events.ip_address
    pub notes: Option<String>,        // ⇔ attendance_events.notes
    pub created_at: String,           // ⇔ attendance_events.created_at (RFC 3339)
}

impl AttendanceEvent {
    /// Build an event that is not yet stored (`id = 0`). `recorded_at` is
    /// the caller's clock reading in epoch millis and becomes `created_at`.
    pub fn new(
        user_id: &str,
        kind: EventType,
        timestamp: i64,
        day: NaiveDate,
        position: Option<Position>,
        meta: &RequestMeta,
        recorded_at: i64,
    ) -> Self {
        Self {
            id: 0,
            user_id: user_id.to_string(),
            kind,
            timestamp,
            day,
            position,
            user_agent: meta.user_agent.clone(),
            ip_address: meta.ip_address.clone(),
            notes: None,
            created_at: DateTime::<Utc>::from_timestamp_millis(recorded_at)
                .unwrap_or_default()
                .to_rfc3339(),
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn day_str(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }

    /// Wall-clock time of the event in the given deployment offset.
    pub fn local_time(&self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        DateTime::from_timestamp_millis(self.timestamp).map(|dt| dt.with_timezone(&offset))
    }

    pub fn get_date_time(&self, offset: FixedOffset) -> String {
        self.local_time(offset)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| self.timestamp.to_string())
    }
}
