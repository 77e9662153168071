//! Property-based tests for parsing and resolution using proptest.
//!
//! These check invariants that hold for any timetable, not just the worked
//! examples in `resolve_tests.rs`.

use std::sync::Arc;

use proptest::prelude::*;
use vacancy_engine::{
    format_minutes, parse_time, Day, NoopObserver, QueryResult, ScheduleEntry, ScheduleQuery,
    SubjectCategory, Timetable,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_room() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("CR1"), Just("CR2"), Just("LAB2")]
}

fn arb_category() -> impl Strategy<Value = SubjectCategory> {
    prop_oneof![Just(SubjectCategory::Regular), Just(SubjectCategory::Special)]
}

/// A valid same-day interval between 08:00 and 18:00, 10-180 minutes long.
fn arb_interval() -> impl Strategy<Value = (u16, u16)> {
    (480u16..1080, 10u16..=180).prop_map(|(start, len)| (start, (start + len).min(1439)))
}

/// Up to 12 Monday entries over three rooms, subjects numbered by load order.
fn arb_entries() -> impl Strategy<Value = Vec<ScheduleEntry>> {
    prop::collection::vec((arb_room(), arb_interval(), arb_category()), 0..12).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (room, (start, end), category))| {
                ScheduleEntry::new(Day::Mon, room, start, end, format!("S{i}"), category).unwrap()
            })
            .collect()
    })
}

fn query(entries: Vec<ScheduleEntry>) -> ScheduleQuery {
    ScheduleQuery::with_observer(Timetable::new(entries), Arc::new(NoopObserver))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn every_minute_roundtrips_through_text(minute in 0u16..1440) {
        prop_assert_eq!(parse_time(&format_minutes(minute)).unwrap(), minute);
    }

    #[test]
    fn out_of_range_hours_rejected(hour in 24u32..100, minute in 0u32..60) {
        let input = format!("{hour:02}:{minute:02}");
        prop_assert!(parse_time(&input).is_err());
    }

    #[test]
    fn out_of_range_minutes_rejected(hour in 0u32..24, minute in 60u32..100) {
        let input = format!("{hour:02}:{minute:02}");
        prop_assert!(parse_time(&input).is_err());
    }

    #[test]
    fn resolve_is_deterministic(entries in arb_entries(), room in arb_room(), minute in 480u16..1260) {
        let query = query(entries);
        let first = query.resolve_at(Day::Mon, room, minute);
        let second = query.resolve_at(Day::Mon, room, minute);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn shared_boundary_is_never_vacant(
        start in 480u16..900,
        first_len in 1u16..120,
        second_len in 1u16..120,
    ) {
        let boundary = start + first_len;
        let query = query(vec![
            ScheduleEntry::new(Day::Mon, "CR1", start, boundary, "A", SubjectCategory::Regular).unwrap(),
            ScheduleEntry::new(Day::Mon, "CR1", boundary, boundary + second_len, "B", SubjectCategory::Regular).unwrap(),
        ]);
        prop_assert!(!query.resolve_at(Day::Mon, "CR1", boundary).is_vacant());
    }

    #[test]
    fn free_slots_agree_with_resolve_at_every_minute(
        entries in arb_entries(),
        room in arb_room(),
        window_start in 420u16..900,
        window_len in 1u16..500,
    ) {
        let window_end = window_start + window_len;
        let query = query(entries);
        let slots = query
            .free_slots(Day::Mon, room, &format_minutes(window_start), &format_minutes(window_end))
            .unwrap();

        for minute in window_start..=window_end {
            let in_slot = slots.iter().any(|slot| slot.contains(minute));
            let vacant = query.resolve_at(Day::Mon, room, minute).is_vacant();
            prop_assert_eq!(in_slot, vacant, "minute {}", format_minutes(minute));
        }
        for slot in &slots {
            prop_assert_eq!(slot.duration_minutes, slot.end - slot.start + 1);
        }
    }

    #[test]
    fn outcome_matches_number_of_covering_entries(
        entries in arb_entries(),
        room in arb_room(),
        minute in 480u16..1260,
    ) {
        let covering: Vec<&ScheduleEntry> = entries
            .iter()
            .filter(|e| e.room() == room && e.is_active_at(minute))
            .collect();
        let expected_len = covering.len();
        let has_regular = covering.iter().any(|e| e.category() == SubjectCategory::Regular);
        let first_regular = covering
            .iter()
            .find(|e| e.category() == SubjectCategory::Regular)
            .map(|e| e.subject().to_string());
        let first_any = covering.first().map(|e| e.subject().to_string());

        let result = query(entries.clone()).resolve_at(Day::Mon, room, minute);

        match result {
            QueryResult::Vacant => prop_assert_eq!(expected_len, 0),
            QueryResult::Occupied { subject, .. } => {
                prop_assert_eq!(expected_len, 1);
                prop_assert_eq!(Some(subject), first_any);
            }
            QueryResult::Conflict { chosen, category, conflicting } => {
                prop_assert!(expected_len > 1);
                prop_assert_eq!(conflicting.len(), expected_len - 1);
                prop_assert!(!conflicting.contains(&chosen));
                if has_regular {
                    prop_assert_eq!(category, SubjectCategory::Regular);
                    prop_assert_eq!(Some(chosen), first_regular);
                } else {
                    prop_assert_eq!(Some(chosen), first_any);
                }
            }
        }
    }
}
