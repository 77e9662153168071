//! Wall-clock time parsing -- `"HH:MM"` strings to minutes since midnight.
//!
//! Timetable times are plain same-day clock readings: no timezone, no date,
//! no wraparound. A minute value is always in `0..MINUTES_PER_DAY`.

use crate::error::{Result, VacancyError};
use chrono::{NaiveTime, Timelike};

/// Number of minutes in a day. Valid minute values are `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Parse a 24-hour `"HH:MM"` clock string into minutes since midnight.
///
/// Surrounding whitespace is ignored. The hour may have one or two digits
/// (`"9:05"` and `"09:05"` are equivalent); the minute must have exactly two.
///
/// # Errors
/// Returns `VacancyError::InvalidTimeFormat` when the string does not have that
/// shape or a component is out of range (hour > 23, minute > 59).
///
/// # Examples
///
/// ```
/// use vacancy_engine::parse_time;
///
/// assert_eq!(parse_time("11:05").unwrap(), 665);
/// assert!(parse_time("25:99").is_err());
/// ```
pub fn parse_time(input: &str) -> Result<u16> {
    let trimmed = input.trim();
    let invalid = || VacancyError::InvalidTimeFormat(input.to_string());

    let (hour, minute) = trimmed.split_once(':').ok_or_else(invalid)?;
    let well_formed = (1..=2).contains(&hour.len())
        && minute.len() == 2
        && hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    // chrono rejects hour > 23 and minute > 59.
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| invalid())?;
    Ok(minutes_of(time))
}

/// Minutes since midnight for a chrono time, dropping seconds.
pub fn minutes_of(time: NaiveTime) -> u16 {
    // hour <= 23 and minute <= 59, so the result is < 1440 and fits in u16.
    (time.hour() * 60 + time.minute()) as u16
}

/// Render minutes since midnight as a zero-padded `"HH:MM"` string.
///
/// Values outside a single day are clamped to `23:59`.
pub fn format_minutes(minutes: u16) -> String {
    let minutes = minutes.min(MINUTES_PER_DAY - 1);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
