//! Sinks for conflict reports.
//!
//! A conflict never changes what a query returns; observers only get told
//! about it.

use parking_lot::Mutex;
use tracing::warn;

use crate::query::ConflictReport;

/// Receives a report each time a query finds a room claimed by more than one
/// subject.
pub trait ConflictObserver: Send + Sync {
    fn on_conflict(&self, report: &ConflictReport);
}

/// Logs every conflict as a `warn` event with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ConflictObserver for TracingObserver {
    fn on_conflict(&self, report: &ConflictReport) {
        warn!(
            day = %report.day,
            room = %report.room,
            time = %report.time,
            chosen = %report.chosen,
            displaced = ?report.displaced,
            "room claimed by more than one subject"
        );
    }
}

/// Discards reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ConflictObserver for NoopObserver {
    fn on_conflict(&self, _report: &ConflictReport) {}
}

/// Keeps every report in memory, in the order received.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    reports: Mutex<Vec<ConflictReport>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the reports received so far.
    pub fn reports(&self) -> Vec<ConflictReport> {
        self.reports.lock().clone()
    }

    /// Remove and return the reports received so far.
    pub fn drain(&self) -> Vec<ConflictReport> {
        std::mem::take(&mut *self.reports.lock())
    }
}

impl ConflictObserver for CollectingObserver {
    fn on_conflict(&self, report: &ConflictReport) {
        self.reports.lock().push(report.clone());
    }
}
