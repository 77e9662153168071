//! Free time of a single room within a window of the day.
//!
//! Class intervals are inclusive at both ends, so a room is busy at every
//! minute from a class's start through its end. Busy periods that overlap or
//! sit on consecutive minutes merge into one block; the minutes of the window
//! outside every block are the free slots.

use std::fmt;

use serde::Serialize;

use crate::entry::ScheduleEntry;
use crate::error::{Result, VacancyError};
use crate::time::format_minutes;

/// A run of consecutive minutes with no class in the room.
///
/// Both `start` and `end` are vacant minutes, so the room reads vacant at every
/// minute of `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeSlot {
    pub start: u16,
    pub end: u16,
    pub duration_minutes: u16,
}

impl FreeSlot {
    pub fn contains(&self, minute: u16) -> bool {
        self.start <= minute && minute <= self.end
    }
}

impl fmt::Display for FreeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} ({} min)",
            format_minutes(self.start),
            format_minutes(self.end),
            self.duration_minutes
        )
    }
}

/// Merge busy periods that overlap or abut (`next.start <= last.end + 1`),
/// clipped to the window `window_start..=window_end`.
///
/// Returns a sorted list of inclusive (start, end) minute pairs separated by at
/// least one free minute.
pub fn merge_busy_periods<'a, I>(entries: I, window_start: u16, window_end: u16) -> Vec<(u16, u16)>
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    let mut intervals: Vec<(u16, u16)> = entries
        .into_iter()
        .filter(|e| e.start() <= window_end && e.end() >= window_start)
        .map(|e| (e.start().max(window_start), e.end().min(window_end)))
        .collect();

    intervals.sort_unstable();

    let mut merged: Vec<(u16, u16)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 + 1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }
    merged
}

/// Free slots within `window_start..=window_end` given one room's entries.
///
/// # Errors
/// Returns `VacancyError::InvalidInterval` when `window_start >= window_end`.
pub fn find_free_slots<'a, I>(entries: I, window_start: u16, window_end: u16) -> Result<Vec<FreeSlot>>
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    if window_start >= window_end {
        return Err(VacancyError::InvalidInterval {
            start: format_minutes(window_start),
            end: format_minutes(window_end),
        });
    }

    let mut free = Vec::new();
    // First minute not yet known to be busy.
    let mut cursor = window_start;

    for (busy_start, busy_end) in merge_busy_periods(entries, window_start, window_end) {
        if cursor < busy_start {
            free.push(slot(cursor, busy_start - 1));
        }
        cursor = cursor.max(busy_end + 1);
    }

    if cursor <= window_end {
        free.push(slot(cursor, window_end));
    }

    Ok(free)
}

fn slot(start: u16, end: u16) -> FreeSlot {
    FreeSlot {
        start,
        end,
        duration_minutes: end - start + 1,
    }
}
