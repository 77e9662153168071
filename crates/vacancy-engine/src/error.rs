//! Error types for vacancy-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VacancyError {
    #[error("Invalid time format: {0:?} (expected HH:MM, 00:00-23:59)")]
    InvalidTimeFormat(String),

    #[error("Invalid day: {0:?} (expected a weekday, MON-FRI)")]
    InvalidDay(String),

    /// Start must be strictly before end on the same day; classes spanning
    /// midnight are not modeled.
    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval { start: String, end: String },

    /// A timetable record could not be turned into a schedule entry.
    /// `index` is the 0-based position of the record in the input array.
    #[error("Invalid record at index {index}: {message}")]
    InvalidRecord { index: usize, message: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VacancyError>;
