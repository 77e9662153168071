//! The loaded timetable and its JSON loader.
//!
//! The JSON format is the one produced by the timetable extractor: an array
//! of flat records with camelCase keys.
//!
//! ```json
//! [
//!   {"section": "A", "day": "MON", "startTime": "10:10", "endTime": "11:05",
//!    "subjectCode": "TCS 501", "room": "CR101", "sourcePDF": "cse-3.pdf"}
//! ]
//! ```
//!
//! `category` (`"regular"` / `"special"`) may be given per record; otherwise
//! it is derived from [`CategoryRules`].

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::entry::{normalize_room, CategoryRules, Day, ScheduleEntry, SubjectCategory};
use crate::error::{Result, VacancyError};
use crate::time::parse_time;

/// Placeholder the extractor writes when a cell's room or time could not be read.
const UNKNOWN: &str = "Unknown";

/// Schedule entries in load order. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timetable {
    entries: Vec<ScheduleEntry>,
}

impl Timetable {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    /// Parse a timetable from a JSON string.
    ///
    /// Records whose room or times are the extractor's `"Unknown"` placeholder
    /// are skipped, as are Saturday and Sunday records. Any other unusable
    /// record fails the whole load.
    ///
    /// # Errors
    /// Returns `VacancyError::Json` if the input is not an array of records, and
    /// `VacancyError::InvalidRecord` for a record with a bad day, time, or interval.
    pub fn from_json_str(json: &str, rules: &CategoryRules) -> Result<Self> {
        let records: Vec<TimetableRecord> = serde_json::from_str(json)?;
        Self::from_records(records, rules)
    }

    /// Parse a timetable from any JSON byte source.
    pub fn from_json_reader<R: Read>(reader: R, rules: &CategoryRules) -> Result<Self> {
        let records: Vec<TimetableRecord> = serde_json::from_reader(reader)?;
        Self::from_records(records, rules)
    }

    fn from_records(records: Vec<TimetableRecord>, rules: &CategoryRules) -> Result<Self> {
        let total = records.len();
        let mut entries = Vec::with_capacity(total);

        for (index, record) in records.into_iter().enumerate() {
            if record.is_placeholder() {
                debug!(index, room = %record.room, "skipping record with unknown room or time");
                continue;
            }
            if record.is_weekend() {
                debug!(index, day = %record.day, "skipping weekend record");
                continue;
            }
            entries.push(record.into_entry(index, rules)?);
        }

        debug!(
            entries = entries.len(),
            skipped = total - entries.len(),
            "timetable loaded"
        );
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct room identifiers, sorted.
    pub fn rooms(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.room())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Entries for one room on one day, in load order. `room` is normalized
    /// before comparison.
    pub fn entries_for<'a>(
        &'a self,
        day: Day,
        room: &str,
    ) -> impl Iterator<Item = &'a ScheduleEntry> + 'a {
        let room = normalize_room(room);
        self.entries
            .iter()
            .filter(move |e| e.day() == day && e.room() == room)
    }
}

/// Load a timetable JSON file from disk.
pub fn load_timetable(path: impl AsRef<Path>, rules: &CategoryRules) -> Result<Timetable> {
    let file = File::open(path.as_ref())?;
    Timetable::from_json_reader(BufReader::new(file), rules)
}

/// One record as written by the extractor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimetableRecord {
    #[serde(default)]
    section: Option<String>,
    day: String,
    start_time: String,
    end_time: String,
    #[serde(alias = "subject")]
    subject_code: String,
    room: String,
    #[serde(default)]
    category: Option<SubjectCategory>,
    #[serde(default, rename = "sourcePDF", alias = "source")]
    source_pdf: Option<String>,
}

impl TimetableRecord {
    fn is_placeholder(&self) -> bool {
        [&self.room, &self.start_time, &self.end_time]
            .iter()
            .any(|field| field.trim().is_empty() || field.trim() == UNKNOWN)
    }

    /// Weekend rows are real extractor output but fall outside the MON-FRI model.
    fn is_weekend(&self) -> bool {
        matches!(
            self.day.trim().to_ascii_uppercase().as_str(),
            "SAT" | "SATURDAY" | "SUN" | "SUNDAY"
        )
    }

    fn into_entry(self, index: usize, rules: &CategoryRules) -> Result<ScheduleEntry> {
        let invalid = |err: VacancyError| VacancyError::InvalidRecord {
            index,
            message: err.to_string(),
        };

        let day: Day = self.day.parse().map_err(invalid)?;
        let start = parse_time(&self.start_time).map_err(invalid)?;
        let end = parse_time(&self.end_time).map_err(invalid)?;
        let category = self
            .category
            .unwrap_or_else(|| rules.classify(&self.subject_code));

        let mut entry = ScheduleEntry::new(day, &self.room, start, end, self.subject_code, category)
            .map_err(invalid)?;
        if let Some(section) = self.section {
            entry = entry.with_section(section);
        }
        if let Some(source) = self.source_pdf {
            entry = entry.with_source(source);
        }
        Ok(entry)
    }
}
