//! Tests for date/time parsing and the serialized record shapes.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use slot_engine::time::{add_minutes, parse_local_datetime, parse_time};
use slot_engine::{BlockedInterval, CandidateSlot, Recurrence, SlotCheck, SlotError, TimeSlot};

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap()
}

#[test]
fn candidate_parses_date_and_time() {
    let candidate = CandidateSlot::parse("2024-06-10", "10:15", 30).unwrap();

    assert_eq!(candidate.start(), at(2024, 6, 10, 10, 15, 0));
    assert_eq!(candidate.end(), at(2024, 6, 10, 10, 45, 0));
}

#[test]
fn candidate_rejects_bad_date() {
    let result = CandidateSlot::parse("2024-13-40", "10:00", 30);
    assert!(matches!(result, Err(SlotError::InvalidDate(_))));
}

#[test]
fn candidate_rejects_bad_time() {
    let result = CandidateSlot::parse("2024-06-10", "25:00", 30);
    assert!(matches!(result, Err(SlotError::InvalidTime(_))));
}

#[test]
fn time_accepts_optional_seconds() {
    let expected = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
    assert_eq!(parse_time("09:30").unwrap(), expected);
    assert_eq!(parse_time("09:30:00").unwrap(), expected);
    assert_eq!(parse_time(" 9:30 ").unwrap(), expected);
}

#[test]
fn local_datetime_accepts_stored_variants() {
    let expected = at(2024, 6, 10, 9, 30, 0);
    assert_eq!(parse_local_datetime("2024-06-10T09:30").unwrap(), expected);
    assert_eq!(parse_local_datetime("2024-06-10T09:30:00").unwrap(), expected);
    assert_eq!(parse_local_datetime("2024-06-10T09:30:00.000").unwrap(), expected);
    assert_eq!(parse_local_datetime("2024-06-10 09:30").unwrap(), expected);
}

#[test]
fn rfc3339_keeps_the_wall_clock_reading() {
    let parsed = parse_local_datetime("2024-06-10T09:30:00-04:00").unwrap();
    assert_eq!(parsed, at(2024, 6, 10, 9, 30, 0));
}

#[test]
fn unparseable_datetime_is_an_error() {
    assert!(matches!(
        parse_local_datetime("next tuesday"),
        Err(SlotError::InvalidDateTime(_))
    ));
}

#[test]
fn add_minutes_saturates_instead_of_panicking() {
    let start = at(2024, 6, 10, 9, 0, 0);
    assert_eq!(add_minutes(start, i64::MAX), NaiveDateTime::MAX);
    assert_eq!(add_minutes(start, i64::MIN), NaiveDateTime::MIN);
    assert_eq!(add_minutes(start, -60), at(2024, 6, 10, 8, 0, 0));
}

#[test]
fn blocked_interval_defaults_missing_fields() {
    let json = r#"{"startTime":"2024-06-10T12:00:00","endTime":"2024-06-10T13:00:00"}"#;

    let interval: BlockedInterval = serde_json::from_str(json).unwrap();

    assert_eq!(interval.recurrence, Recurrence::None);
    assert!(!interval.is_all_day);
    assert_eq!(interval.reason, None);
}

#[test]
fn blocked_interval_serializes_camel_case() {
    let interval = BlockedInterval::all_day(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
        .with_reason("Holiday");

    let value = serde_json::to_value(&interval).unwrap();

    assert_eq!(value["startTime"], "2024-06-10T00:00:00");
    assert_eq!(value["endTime"], "2024-06-10T23:59:59");
    assert_eq!(value["isAllDay"], true);
    assert_eq!(value["recurrence"], "none");
    assert_eq!(value["reason"], "Holiday");
    assert!(value.get("id").is_none());
}

#[test]
fn slot_check_omits_missing_reason() {
    assert_eq!(
        serde_json::to_string(&SlotCheck::free()).unwrap(),
        r#"{"blocked":false}"#
    );
    assert_eq!(
        serde_json::to_string(&SlotCheck::blocked("Lunch")).unwrap(),
        r#"{"blocked":true,"reason":"Lunch"}"#
    );
}

#[test]
fn time_slot_serializes_label_and_flag() {
    let slot = TimeSlot {
        time: "09:15".to_string(),
        available: true,
    };
    assert_eq!(
        serde_json::to_string(&slot).unwrap(),
        r#"{"time":"09:15","available":true}"#
    );
}
