//! # vacancy-engine
//!
//! Classroom occupancy lookup over a static weekly timetable.
//!
//! Given a timetable (loaded once, never mutated) the engine answers "is this
//! room in use on this day at this time?". Class intervals are matched
//! inclusively at both ends so back-to-back classes leave no vacant minute,
//! and rooms claimed by several subjects at once are settled deterministically
//! in favour of regular subjects over special sessions.
//!
//! ## Quick start
//!
//! ```rust
//! use vacancy_engine::{CategoryRules, Day, QueryResult, ScheduleQuery, Timetable};
//!
//! let json = r#"[
//!   {"day": "MON", "startTime": "10:10", "endTime": "11:05", "subjectCode": "Math", "room": "CR1"}
//! ]"#;
//! let timetable = Timetable::from_json_str(json, &CategoryRules::default()).unwrap();
//! let query = ScheduleQuery::new(timetable);
//!
//! assert_eq!(query.resolve(Day::Mon, "CR1", "10:30").unwrap().occupant(), Some("Math"));
//! assert_eq!(query.resolve(Day::Mon, "CR1", "12:00").unwrap(), QueryResult::Vacant);
//! ```
//!
//! ## Modules
//!
//! - [`time`] — `"HH:MM"` strings ⇄ minutes since midnight
//! - [`entry`] — days, subject categories, schedule entries, room normalization
//! - [`timetable`] — the loaded dataset and its JSON loader
//! - [`query`] — point-in-time resolution and conflict adjudication
//! - [`observer`] — sinks for conflict reports
//! - [`occupancy`] — free slots of a room within a window
//! - [`store`] — atomically swappable timetable snapshots
//! - [`error`] — Error types

pub mod entry;
pub mod error;
pub mod observer;
pub mod occupancy;
pub mod query;
pub mod store;
pub mod time;
pub mod timetable;

pub use entry::{normalize_room, CategoryRules, Day, ScheduleEntry, SubjectCategory};
pub use error::VacancyError;
pub use observer::{CollectingObserver, ConflictObserver, NoopObserver, TracingObserver};
pub use occupancy::FreeSlot;
pub use query::{adjudicate, ConflictReport, QueryResult, ScheduleQuery};
pub use store::TimetableStore;
pub use time::{format_minutes, parse_time};
pub use timetable::{load_timetable, Timetable};
