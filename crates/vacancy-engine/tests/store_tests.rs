//! Tests for swapping timetable snapshots.

use std::sync::Arc;
use std::thread;

use vacancy_engine::{
    parse_time, Day, NoopObserver, ScheduleEntry, SubjectCategory, Timetable, TimetableStore,
};

fn timetable(subject: &str) -> Timetable {
    Timetable::new(vec![ScheduleEntry::new(
        Day::Mon,
        "CR1",
        parse_time("09:00").unwrap(),
        parse_time("10:00").unwrap(),
        subject,
        SubjectCategory::Regular,
    )
    .unwrap()])
}

#[test]
fn replace_returns_previous_snapshot() {
    let store = TimetableStore::new(timetable("Old"));

    let previous = store.replace(timetable("New"));

    assert_eq!(previous.entries()[0].subject(), "Old");
    assert_eq!(store.snapshot().entries()[0].subject(), "New");
}

#[test]
fn existing_query_keeps_its_snapshot() {
    let store = TimetableStore::with_observer(timetable("Old"), Arc::new(NoopObserver));
    let before = store.query();

    store.replace(timetable("New"));
    let after = store.query();

    assert_eq!(before.resolve(Day::Mon, "CR1", "09:30").unwrap().occupant(), Some("Old"));
    assert_eq!(after.resolve(Day::Mon, "CR1", "09:30").unwrap().occupant(), Some("New"));
}

#[test]
fn concurrent_readers_see_whole_snapshots() {
    let store = Arc::new(TimetableStore::with_observer(
        timetable("Old"),
        Arc::new(NoopObserver),
    ));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..200 {
                    let result = store.query().resolve(Day::Mon, "CR1", "09:30").unwrap();
                    let subject = result.occupant().unwrap().to_string();
                    assert!(subject == "Old" || subject == "New");
                }
            })
        })
        .collect();

    store.replace(timetable("New"));

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(store.snapshot().entries()[0].subject(), "New");
}
