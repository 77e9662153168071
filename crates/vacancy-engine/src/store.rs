//! Shared, swappable timetable snapshots.
//!
//! Readers take an `Arc` to the current timetable and keep using it for as
//! long as they like; a reload installs a new `Arc` and never touches entries
//! a reader may still hold.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::observer::{ConflictObserver, TracingObserver};
use crate::query::ScheduleQuery;
use crate::timetable::Timetable;

pub struct TimetableStore {
    current: RwLock<Arc<Timetable>>,
    observer: Arc<dyn ConflictObserver>,
}

impl TimetableStore {
    pub fn new(timetable: Timetable) -> Self {
        Self::with_observer(timetable, Arc::new(TracingObserver))
    }

    pub fn with_observer(timetable: Timetable, observer: Arc<dyn ConflictObserver>) -> Self {
        Self {
            current: RwLock::new(Arc::new(timetable)),
            observer,
        }
    }

    /// The timetable as of now.
    pub fn snapshot(&self) -> Arc<Timetable> {
        Arc::clone(&self.current.read())
    }

    /// Install a new timetable and return the one it replaced.
    pub fn replace(&self, timetable: Timetable) -> Arc<Timetable> {
        let next = Arc::new(timetable);
        let entries = next.len();
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!(entries, previous = previous.len(), "timetable replaced");
        previous
    }

    /// A query bound to the current snapshot. Later reloads do not affect it.
    pub fn query(&self) -> ScheduleQuery {
        ScheduleQuery::with_observer(self.snapshot(), Arc::clone(&self.observer))
    }
}

impl std::fmt::Debug for TimetableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimetableStore")
            .field("entries", &self.current.read().len())
            .finish_non_exhaustive()
    }
}
