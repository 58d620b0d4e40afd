//! Time range parsing and overlap detection for "HH.MM-HH.MM" strings

use thiserror::Error;

use super::types::ScheduleEntry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("time range \"{0}\" has no '-' between start and end")]
    MissingRangeSeparator(String),
    #[error("time \"{0}\" has no '.' between hour and minute")]
    MissingMinuteSeparator(String),
    #[error("\"{0}\" is not a whole number")]
    NotANumber(String),
    #[error("time \"{0}\" is too large to count in minutes")]
    OutOfRange(String),
}

/// Hour and minute exactly as written; "9.75" keeps minute 75
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: i32,
    pub minute: i32,
}

impl ClockTime {
    pub fn new(hour: i32, minute: i32) -> Self {
        Self { hour, minute }
    }

    pub fn minutes(&self) -> i32 {
        self.hour.wrapping_mul(60).wrapping_add(self.minute)
    }
}

/// A parsed [start, end) interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeSlot {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    pub fn start_minutes(&self) -> i32 {
        self.start.minutes()
    }

    pub fn end_minutes(&self) -> i32 {
        self.end.minutes()
    }
}

/// Parse a time range like "09.00-10.30".
///
/// Only the first two '-' fields and the first two '.' fields of each half
/// are read, so "9.00-10.00-11.00" is 9.00 to 10.00. Hour and minute values
/// are not range-checked: "9.75" is 9*60+75 minutes.
pub fn parse_time_range(text: &str) -> Result<TimeSlot, FormatError> {
    let mut halves = text.split('-');
    let start = halves.next().unwrap_or_default();
    let end = halves
        .next()
        .ok_or_else(|| FormatError::MissingRangeSeparator(text.to_string()))?;

    Ok(TimeSlot::new(parse_clock(start)?, parse_clock(end)?))
}

/// Parse one "H.MM" half
fn parse_clock(text: &str) -> Result<ClockTime, FormatError> {
    let mut parts = text.split('.');
    let hour = parse_number(parts.next().unwrap_or_default())?;
    let minute = parts
        .next()
        .ok_or_else(|| FormatError::MissingMinuteSeparator(text.to_string()))?;
    let minute = parse_number(minute)?;

    // Minute offsets must fit in i32 for overlap comparisons
    hour.checked_mul(60)
        .and_then(|m| m.checked_add(minute))
        .ok_or_else(|| FormatError::OutOfRange(text.to_string()))?;

    Ok(ClockTime::new(hour, minute))
}

fn parse_number(text: &str) -> Result<i32, FormatError> {
    text.parse::<i32>()
        .map_err(|_| FormatError::NotANumber(text.to_string()))
}

/// Half-open intersection: a block ending exactly when another starts does not overlap.
pub fn overlaps(a: TimeSlot, b: TimeSlot) -> bool {
    a.start_minutes() < b.end_minutes() && a.end_minutes() > b.start_minutes()
}

/// Check whether `new_range` on `day` collides with any existing entry on the same day.
///
/// Days are compared case-insensitively, so an unrecognized day only ever
/// matches entries carrying the same spelling. The result is advisory; the
/// caller decides whether to insert anyway.
pub fn has_conflict(
    existing: &[ScheduleEntry],
    day: &str,
    new_range: &str,
) -> Result<bool, FormatError> {
    let new_slot = parse_time_range(new_range)?;

    for entry in existing {
        if entry.day().eq_ignore_ascii_case(day) {
            let existing_slot = parse_time_range(entry.time_range())?;
            if overlaps(new_slot, existing_slot) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
