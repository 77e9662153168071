//! Tests for `"HH:MM"` parsing and formatting.

use vacancy_engine::{format_minutes, parse_time, VacancyError};

#[test]
fn midnight_is_zero() {
    assert_eq!(parse_time("00:00").unwrap(), 0);
}

#[test]
fn last_minute_of_day() {
    assert_eq!(parse_time("23:59").unwrap(), 1439);
}

#[test]
fn class_start_times() {
    assert_eq!(parse_time("10:10").unwrap(), 610);
    assert_eq!(parse_time("11:05").unwrap(), 665);
}

#[test]
fn single_digit_hour_accepted() {
    assert_eq!(parse_time("9:05").unwrap(), parse_time("09:05").unwrap());
}

#[test]
fn surrounding_whitespace_ignored() {
    assert_eq!(parse_time("  14:30 ").unwrap(), 870);
}

#[test]
fn out_of_range_components_rejected() {
    for input in ["25:99", "24:00", "23:60", "12:75"] {
        let err = parse_time(input).unwrap_err();
        assert!(
            matches!(err, VacancyError::InvalidTimeFormat(ref s) if s == input),
            "{input} should be InvalidTimeFormat, got {err:?}"
        );
    }
}

#[test]
fn malformed_strings_rejected() {
    for input in ["", "1030", "10:3", "10:300", "10-30", "ab:cd", "+1:30", "10:30pm", "123:00"] {
        assert!(
            matches!(parse_time(input), Err(VacancyError::InvalidTimeFormat(_))),
            "{input:?} should be rejected"
        );
    }
}

#[test]
fn format_pads_both_components() {
    assert_eq!(format_minutes(0), "00:00");
    assert_eq!(format_minutes(545), "09:05");
    assert_eq!(format_minutes(1439), "23:59");
}

#[test]
fn error_message_names_input() {
    let err = parse_time("25:99").unwrap_err();
    assert!(err.to_string().contains("25:99"));
}
