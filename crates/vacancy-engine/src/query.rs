//! Point-in-time room occupancy queries.
//!
//! A query collects the entries of one room on one day that are in session at
//! the query minute (inclusive at both ends) and settles collisions with a
//! fixed rule: the first Regular entry in load order wins, otherwise the first
//! entry. Everything else active at that minute is reported as displaced.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;

use crate::entry::{normalize_room, Day, ScheduleEntry, SubjectCategory};
use crate::error::Result;
use crate::observer::{ConflictObserver, TracingObserver};
use crate::occupancy::{self, FreeSlot};
use crate::time::{format_minutes, parse_time};
use crate::timetable::Timetable;

/// Outcome of an occupancy query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryResult {
    /// Exactly one class is in session.
    Occupied {
        subject: String,
        category: SubjectCategory,
    },
    /// No class is in session (also the answer for rooms or days with no entries).
    Vacant,
    /// Several classes claim the room; `chosen` is the one reported as occupying
    /// it, `conflicting` the rest in load order.
    Conflict {
        chosen: String,
        category: SubjectCategory,
        conflicting: Vec<String>,
    },
}

impl QueryResult {
    pub fn is_vacant(&self) -> bool {
        matches!(self, QueryResult::Vacant)
    }

    /// The subject occupying the room, whether uncontested or chosen from a conflict.
    pub fn occupant(&self) -> Option<&str> {
        match self {
            QueryResult::Occupied { subject, .. } => Some(subject),
            QueryResult::Conflict { chosen, .. } => Some(chosen),
            QueryResult::Vacant => None,
        }
    }

    /// Structured report for a conflict result; `None` otherwise.
    pub fn conflict_report(&self, day: Day, room: &str, minute: u16) -> Option<ConflictReport> {
        match self {
            QueryResult::Conflict {
                chosen,
                conflicting,
                ..
            } => Some(ConflictReport {
                day,
                room: normalize_room(room),
                minute,
                time: format_minutes(minute),
                chosen: chosen.clone(),
                displaced: conflicting.clone(),
            }),
            _ => None,
        }
    }
}

/// Diagnostic description of one collision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConflictReport {
    pub day: Day,
    pub room: String,
    pub minute: u16,
    /// `minute` as `HH:MM`.
    pub time: String,
    pub chosen: String,
    pub displaced: Vec<String>,
}

/// Settle which of the active entries occupies the room.
///
/// `active` must already be restricted to one room, day and minute, and be in
/// load order.
pub fn adjudicate<'a, I>(active: I) -> QueryResult
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    let active: Vec<&ScheduleEntry> = active.into_iter().collect();
    match active.as_slice() {
        [] => QueryResult::Vacant,
        [only] => QueryResult::Occupied {
            subject: only.subject().to_string(),
            category: only.category(),
        },
        _ => {
            let chosen_index = active
                .iter()
                .position(|e| e.category() == SubjectCategory::Regular)
                .unwrap_or(0);
            let chosen = active[chosen_index];
            let conflicting = active
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != chosen_index)
                .map(|(_, e)| e.subject().to_string())
                .collect();
            QueryResult::Conflict {
                chosen: chosen.subject().to_string(),
                category: chosen.category(),
                conflicting,
            }
        }
    }
}

/// Answers occupancy queries against one timetable snapshot.
#[derive(Clone)]
pub struct ScheduleQuery {
    timetable: Arc<Timetable>,
    observer: Arc<dyn ConflictObserver>,
}

impl std::fmt::Debug for ScheduleQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleQuery")
            .field("entries", &self.timetable.len())
            .finish_non_exhaustive()
    }
}

impl ScheduleQuery {
    /// Query a timetable, logging conflicts through [`TracingObserver`].
    pub fn new(timetable: impl Into<Arc<Timetable>>) -> Self {
        Self::with_observer(timetable, Arc::new(TracingObserver))
    }

    pub fn with_observer(
        timetable: impl Into<Arc<Timetable>>,
        observer: Arc<dyn ConflictObserver>,
    ) -> Self {
        Self {
            timetable: timetable.into(),
            observer,
        }
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Is `room` occupied on `day` at `time` (`"HH:MM"`)?
    ///
    /// Unknown rooms and days without entries are `Vacant`. A conflict is
    /// passed to the observer before being returned.
    ///
    /// # Errors
    /// Returns `VacancyError::InvalidTimeFormat` if `time` does not parse.
    pub fn resolve(&self, day: Day, room: &str, time: &str) -> Result<QueryResult> {
        let minute = parse_time(time)?;
        Ok(self.resolve_at(day, room, minute))
    }

    /// [`resolve`](Self::resolve) with the time already in minutes since midnight.
    pub fn resolve_at(&self, day: Day, room: &str, minute: u16) -> QueryResult {
        let result = adjudicate(
            self.timetable
                .entries_for(day, room)
                .filter(|e| e.is_active_at(minute)),
        );
        if let Some(report) = result.conflict_report(day, room, minute) {
            self.observer.on_conflict(&report);
        }
        result
    }

    /// Every known room with its status at `time`, sorted by room.
    pub fn room_status_board(&self, day: Day, time: &str) -> Result<Vec<(String, QueryResult)>> {
        let minute = parse_time(time)?;
        Ok(self
            .timetable
            .rooms()
            .into_iter()
            .map(|room| {
                let result = self.resolve_at(day, &room, minute);
                (room, result)
            })
            .collect())
    }

    /// Known rooms with no class in session at `time`, sorted.
    pub fn vacant_rooms(&self, day: Day, time: &str) -> Result<Vec<String>> {
        let minute = parse_time(time)?;
        let busy: BTreeSet<&str> = self
            .timetable
            .entries()
            .iter()
            .filter(|e| e.day() == day && e.is_active_at(minute))
            .map(|e| e.room())
            .collect();
        Ok(self
            .timetable
            .rooms()
            .into_iter()
            .filter(|room| !busy.contains(room.as_str()))
            .collect())
    }

    /// Free slots of `room` on `day` between `from` and `to`.
    ///
    /// # Errors
    /// Returns `VacancyError::InvalidTimeFormat` for a bad bound and
    /// `VacancyError::InvalidInterval` when `from` is not before `to`.
    pub fn free_slots(&self, day: Day, room: &str, from: &str, to: &str) -> Result<Vec<FreeSlot>> {
        let window_start = parse_time(from)?;
        let window_end = parse_time(to)?;
        occupancy::find_free_slots(self.timetable.entries_for(day, room), window_start, window_end)
    }

    /// First free slot of at least `min_minutes` for `room` between `from` and `to`.
    pub fn first_free_slot(
        &self,
        day: Day,
        room: &str,
        from: &str,
        to: &str,
        min_minutes: u16,
    ) -> Result<Option<FreeSlot>> {
        Ok(self
            .free_slots(day, room, from, to)?
            .into_iter()
            .find(|slot| slot.duration_minutes >= min_minutes))
    }

    /// Every collision on `day`, for auditing a dataset.
    ///
    /// The set of active entries in a room only changes at an entry's start
    /// minute or at the minute after an entry's end, so each room is checked at
    /// exactly those minutes. Reports with the same room, chosen and displaced
    /// subjects are listed once, at the earliest minute. Reports are ordered by
    /// room, then minute. The observer is not notified.
    pub fn conflicts(&self, day: Day) -> Vec<ConflictReport> {
        let mut by_room: BTreeMap<&str, Vec<&ScheduleEntry>> = BTreeMap::new();
        for entry in self.timetable.entries().iter().filter(|e| e.day() == day) {
            by_room.entry(entry.room()).or_default().push(entry);
        }

        let mut reports = Vec::new();
        for (room, entries) in by_room {
            let checkpoints: BTreeSet<u16> = entries
                .iter()
                .flat_map(|e| [e.start(), e.end() + 1])
                .collect();
            let mut seen: BTreeSet<(String, Vec<String>)> = BTreeSet::new();
            for minute in checkpoints {
                let result = adjudicate(entries.iter().copied().filter(|e| e.is_active_at(minute)));
                if let Some(report) = result.conflict_report(day, room, minute) {
                    if seen.insert((report.chosen.clone(), report.displaced.clone())) {
                        reports.push(report);
                    }
                }
            }
        }
        reports
    }
}
