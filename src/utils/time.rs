//! Time utilities: parsing HH:MM and combining it with a local day.

use crate::errors::{AppError, AppResult};
use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Epoch millis of `day` at `time` in the deployment offset.
pub fn local_millis(day: NaiveDate, time: NaiveTime, offset: FixedOffset) -> AppResult<i64> {
    offset
        .from_local_datetime(&day.and_time(time))
        .single()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| AppError::InvalidTime(format!("{day} {time}")))
}

/// Sort two wall-clock times so the earlier one comes first.
pub fn ascending(a: NaiveTime, b: NaiveTime) -> (NaiveTime, NaiveTime) {
    if a <= b { (a, b) } else { (b, a) }
}
