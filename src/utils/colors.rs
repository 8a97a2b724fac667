//! ANSI color helper utilities for terminal output.

use crate::core::calendar::DayStatus;
use crate::models::event_type::EventType;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const RED: &str = "\x1b[31m";

pub fn color_for_status(status: DayStatus) -> &'static str {
    match status {
        DayStatus::None => GREY,
        DayStatus::CheckedIn => YELLOW,
        DayStatus::CheckedOut => GREEN,
    }
}

pub fn colorize_kind(kind: EventType) -> String {
    let color = match kind {
        EventType::CheckIn => GREEN,
        EventType::CheckOut => RED,
    };
    format!("{color}{}{RESET}", kind.label())
}

/// Grey out an empty/placeholder value.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
