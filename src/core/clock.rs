//! Time source and calendar-day arithmetic in the deployment offset.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

pub trait Clock {
    /// Current time in epoch milliseconds.
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

fn offset_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([+-])(\d{2}):?(\d{2})$").expect("static offset pattern compiles")
    })
}

/// Parse `+09:00`, `-0530`, `Z` or `UTC` into a fixed offset.
pub fn parse_utc_offset(s: &str) -> AppResult<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| AppError::InvalidUtcOffset(s.into()));
    }

    let caps = offset_pattern()
        .captures(s)
        .ok_or_else(|| AppError::InvalidUtcOffset(s.to_string()))?;

    let hours: i32 = caps[2].parse().map_err(|_| AppError::InvalidUtcOffset(s.into()))?;
    let minutes: i32 = caps[3].parse().map_err(|_| AppError::InvalidUtcOffset(s.into()))?;
    if minutes >= 60 {
        return Err(AppError::InvalidUtcOffset(s.to_string()));
    }

    let secs = (hours * 3600 + minutes * 60) * if &caps[1] == "-" { -1 } else { 1 };
    FixedOffset::east_opt(secs).ok_or_else(|| AppError::InvalidUtcOffset(s.to_string()))
}

/// Epoch millis of local midnight starting `day`.
pub fn start_of_day(day: NaiveDate, offset: FixedOffset) -> AppResult<i64> {
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::InvalidDate(day.to_string()))?;
    offset
        .from_local_datetime(&midnight)
        .single()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| AppError::InvalidDate(day.to_string()))
}

/// Local calendar day of an instant.
pub fn local_day(ts_millis: i64, offset: FixedOffset) -> AppResult<NaiveDate> {
    DateTime::from_timestamp_millis(ts_millis)
        .map(|dt| dt.with_timezone(&offset).date_naive())
        .ok_or_else(|| AppError::InvalidTime(format!("timestamp {ts_millis} out of range")))
}

/// Half-open interval `[start, end)` in epoch millis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    /// From local midnight of `first` to local midnight after `last`.
    pub fn for_days(first: NaiveDate, last: NaiveDate, offset: FixedOffset) -> AppResult<Self> {
        let after_last = last
            .succ_opt()
            .ok_or_else(|| AppError::InvalidDate(last.to_string()))?;
        Ok(Self {
            start: start_of_day(first, offset)?,
            end: start_of_day(after_last, offset)?,
        })
    }

    pub fn month(year: i32, month: u32, offset: FixedOffset) -> AppResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;

        Ok(Self {
            start: start_of_day(first, offset)?,
            end: start_of_day(next, offset)?,
        })
    }

    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.start && ts < self.end
    }
}

/// The calendar day containing an instant, with its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub day: NaiveDate,
    pub range: TimeRange,
}

impl DayWindow {
    pub fn containing(ts_millis: i64, offset: FixedOffset) -> AppResult<Self> {
        let day = local_day(ts_millis, offset)?;
        Ok(Self {
            day,
            range: TimeRange::for_days(day, day, offset)?,
        })
    }

    pub fn year_month(&self) -> (i32, u32) {
        (self.day.year(), self.day.month())
    }
}
