//! Month calendar of per-day attendance status.

use crate::errors::{AppError, AppResult};
use crate::models::event::AttendanceEvent;
use crate::models::event_type::EventType;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    None,
    CheckedIn,
    CheckedOut,
}

impl From<Option<EventType>> for DayStatus {
    fn from(kind: Option<EventType>) -> Self {
        match kind {
            None => DayStatus::None,
            Some(EventType::CheckIn) => DayStatus::CheckedIn,
            Some(EventType::CheckOut) => DayStatus::CheckedOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub status: DayStatus,
}

/// Weeks run Sunday..Saturday; `None` cells pad the first and last week.
#[derive(Debug, Clone, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[Option<CalendarDay>; 7]>,
}

pub fn build_month(events: &[AttendanceEvent], year: i32, month: u32) -> AppResult<MonthCalendar> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;

    let mut weeks: Vec<[Option<CalendarDay>; 7]> = Vec::new();
    let mut week = [None; 7];
    let mut col = first.weekday().num_days_from_sunday() as usize;

    let mut d = first;
    while d.month() == month {
        let furthest = events
            .iter()
            .filter(|ev| ev.day == d)
            .map(|ev| ev.kind)
            .max();

        week[col] = Some(CalendarDay {
            day: d.day(),
            status: DayStatus::from(furthest),
        });

        col += 1;
        if col == 7 {
            weeks.push(week);
            week = [None; 7];
            col = 0;
        }

        d = match d.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    if col > 0 {
        weeks.push(week);
    }

    Ok(MonthCalendar { year, month, weeks })
}
