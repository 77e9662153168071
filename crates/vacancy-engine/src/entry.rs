//! Timetable data model: weekdays, subject categories, and schedule entries.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VacancyError};
use crate::time::{format_minutes, MINUTES_PER_DAY};

/// A teaching day. Timetables only cover Monday through Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    /// Three-letter uppercase code, as used by timetable exports.
    pub fn code(self) -> &'static str {
        match self {
            Day::Mon => "MON",
            Day::Tue => "TUE",
            Day::Wed => "WED",
            Day::Thu => "THU",
            Day::Fri => "FRI",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Accepts the three-letter code or the full English name, in any case
/// (`"MON"`, `"Mon"`, `"monday"`).
impl FromStr for Day {
    type Err = VacancyError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let day = match upper.as_str() {
            "MON" | "MONDAY" => Day::Mon,
            "TUE" | "TUESDAY" => Day::Tue,
            "WED" | "WEDNESDAY" => Day::Wed,
            "THU" | "THURSDAY" => Day::Thu,
            "FRI" | "FRIDAY" => Day::Fri,
            _ => return Err(VacancyError::InvalidDay(s.to_string())),
        };
        Ok(day)
    }
}

impl TryFrom<Weekday> for Day {
    type Error = VacancyError;

    fn try_from(weekday: Weekday) -> Result<Self> {
        match weekday {
            Weekday::Mon => Ok(Day::Mon),
            Weekday::Tue => Ok(Day::Tue),
            Weekday::Wed => Ok(Day::Wed),
            Weekday::Thu => Ok(Day::Thu),
            Weekday::Fri => Ok(Day::Fri),
            Weekday::Sat | Weekday::Sun => Err(VacancyError::InvalidDay(weekday.to_string())),
        }
    }
}

/// Priority class of a subject when entries collide.
///
/// Special subjects (electives, CEC, project-based sessions) yield the room to
/// Regular subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectCategory {
    #[default]
    Regular,
    Special,
}

/// Subject names classified as [`SubjectCategory::Special`] at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRules {
    pub special: Vec<String>,
}

impl CategoryRules {
    /// Subject codes the timetable extractor emits for non-regular sessions.
    pub const DEFAULT_SPECIAL: [&'static str; 3] = ["CEC", "ELECTIVE", "PROJECTBASEDLEARNING"];

    /// Rules with no Special subjects: everything classifies as Regular.
    pub fn empty() -> Self {
        Self {
            special: Vec::new(),
        }
    }

    /// Add more Special subject names to these rules.
    pub fn with_special<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.special.extend(names.into_iter().map(Into::into));
        self
    }

    /// Classify a subject name. Comparison ignores case and whitespace, so
    /// `"Project Based Learning"` matches `PROJECTBASEDLEARNING`.
    pub fn classify(&self, subject: &str) -> SubjectCategory {
        let key = subject_key(subject);
        if self.special.iter().any(|s| subject_key(s) == key) {
            SubjectCategory::Special
        } else {
            SubjectCategory::Regular
        }
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::empty().with_special(Self::DEFAULT_SPECIAL)
    }
}

fn subject_key(subject: &str) -> String {
    subject
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Canonical form of a room identifier.
///
/// Uppercases and drops spaces, `-` and `_`. For numbered lab rooms
/// (`LAB`, `TCL`, `UBUNTULAB`, `GCLAB`) leading zeros of the number are
/// dropped, and `LOGICLAB` rooms keep only their first number.
///
/// ```
/// use vacancy_engine::normalize_room;
///
/// assert_eq!(normalize_room("cr 101"), "CR101");
/// assert_eq!(normalize_room("Lab-05"), "LAB5");
/// ```
pub fn normalize_room(room: &str) -> String {
    let compact: String = room
        .chars()
        .filter(|c| !matches!(*c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    // Longest prefixes first so "UBUNTULAB" is not read as "UBUNTU" + "LAB".
    for prefix in ["UBUNTULAB", "GCLAB", "LAB", "TCL"] {
        if let Some(number) = compact.strip_prefix(prefix) {
            if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) {
                let number = match number.trim_start_matches('0') {
                    "" => "0",
                    rest => rest,
                };
                return format!("{prefix}{number}");
            }
        }
    }

    if compact.contains("LOGICLAB") {
        let rest = compact.replace("LOGICLAB", "");
        let digits: String = rest
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();
        return format!("LOGICLAB{digits}");
    }

    compact
}

/// One scheduled class occupying a room for an interval on a given day.
///
/// Entries are validated on construction (`start < end`, both within the day)
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    day: Day,
    room: String,
    start: u16,
    end: u16,
    subject: String,
    category: SubjectCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl ScheduleEntry {
    /// Build an entry. The room identifier is normalized with [`normalize_room`].
    ///
    /// # Errors
    /// Returns `VacancyError::InvalidInterval` unless `start < end < 1440`.
    pub fn new(
        day: Day,
        room: &str,
        start: u16,
        end: u16,
        subject: impl Into<String>,
        category: SubjectCategory,
    ) -> Result<Self> {
        if start >= end || end >= MINUTES_PER_DAY {
            return Err(VacancyError::InvalidInterval {
                start: format_minutes(start),
                end: format_minutes(end),
            });
        }
        Ok(Self {
            day,
            room: normalize_room(room),
            start,
            end,
            subject: subject.into(),
            category,
            section: None,
            source: None,
        })
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Start minute (inclusive).
    pub fn start(&self) -> u16 {
        self.start
    }

    /// End minute (inclusive).
    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn category(&self) -> SubjectCategory {
        self.category
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Whether the class is in session at `minute`.
    ///
    /// Both endpoints count, so a class ending at 11:05 and one starting at
    /// 11:05 are both active at 11:05 and the room never reads vacant between
    /// back-to-back classes.
    pub fn is_active_at(&self, minute: u16) -> bool {
        self.start <= minute && minute <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lab_numbers_lose_leading_zeros() {
        assert_eq!(normalize_room("LAB005"), "LAB5");
        assert_eq!(normalize_room("lab0"), "LAB0");
        assert_eq!(normalize_room("tcl 07"), "TCL7");
        assert_eq!(normalize_room("Ubuntu Lab 02"), "UBUNTULAB2");
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        for raw in ["lab 005", "cr-101", "Ubuntu Lab 02", "logic lab 3", "LT 04"] {
            let once = normalize_room(raw);
            assert_eq!(normalize_room(&once), once);
        }
    }

    #[test]
    fn logic_lab_keeps_first_number() {
        assert_eq!(normalize_room("LOGIC LAB 3 (A)"), "LOGICLAB3");
        assert_eq!(normalize_room("logiclab"), "LOGICLAB");
    }

    #[test]
    fn lecture_rooms_only_compact() {
        assert_eq!(normalize_room("lt-04"), "LT04");
    }

    #[test]
    fn classify_ignores_case_and_spaces() {
        let rules = CategoryRules::default();
        assert_eq!(rules.classify("cec"), SubjectCategory::Special);
        assert_eq!(
            rules.classify("Project Based Learning"),
            SubjectCategory::Special
        );
        assert_eq!(rules.classify("TCS 501"), SubjectCategory::Regular);
    }
}
