//! Tests for single-candidate conflict checking.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use slot_engine::conflict::{APPOINTMENT_REASON, ALL_DAY_REASON, BLOCKED_REASON};
use slot_engine::{
    is_slot_blocked, is_slot_blocked_with, BlockedInterval, CandidateSlot, ExistingAppointment,
    OverlapRule, SlotCheck,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn time(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

fn at(day: NaiveDate, hour: u32, min: u32) -> NaiveDateTime {
    day.and_time(time(hour, min))
}

/// Helper to create a one-off block between two times on the same day.
fn block(
    day: NaiveDate,
    start_hour: u32,
    start_min: u32,
    end_hour: u32,
    end_min: u32,
) -> BlockedInterval {
    BlockedInterval::new(at(day, start_hour, start_min), at(day, end_hour, end_min))
}

fn appointment(day: NaiveDate, hour: u32, min: u32, duration: i64) -> ExistingAppointment {
    ExistingAppointment::new(day, time(hour, min), duration)
}

#[test]
fn empty_inputs_never_block() {
    let check = is_slot_blocked(date(2024, 6, 10), time(10, 0), 30, &[], &[]);
    assert_eq!(check, SlotCheck::free());
    assert_eq!(check.reason, None);
}

#[test]
fn all_day_block_covers_every_time_that_day() {
    let day = date(2024, 6, 10);
    let blocked = vec![BlockedInterval::all_day(day)];

    for (hour, min, duration) in [(0, 0, 15), (9, 0, 30), (13, 45, 90), (23, 45, 600)] {
        let check = is_slot_blocked(day, time(hour, min), duration, &blocked, &[]);
        assert!(check.blocked, "{:02}:{:02} should be blocked", hour, min);
        assert_eq!(check.reason.as_deref(), Some(ALL_DAY_REASON));
    }
}

#[test]
fn all_day_block_does_not_reach_the_next_day() {
    let blocked = vec![BlockedInterval::all_day(date(2024, 6, 10))];

    let check = is_slot_blocked(date(2024, 6, 11), time(9, 0), 30, &blocked, &[]);

    assert!(!check.blocked, "2024-06-11 must not be blocked");
}

#[test]
fn all_day_flag_ignores_the_stored_end() {
    // Stored end equals start; the flag alone decides.
    let day = date(2024, 6, 10);
    let mut interval = BlockedInterval::new(at(day, 0, 0), at(day, 0, 0));
    interval.is_all_day = true;

    let check = is_slot_blocked(day, time(15, 0), 30, &[interval], &[]);

    assert!(check.blocked);
}

#[test]
fn block_reason_is_surfaced() {
    let day = date(2024, 6, 10);
    let blocked = vec![
        BlockedInterval::all_day(day).with_reason("Vacation"),
        block(date(2024, 6, 11), 12, 0, 13, 0).with_reason("Lunch"),
    ];

    let vacation = is_slot_blocked(day, time(10, 0), 30, &blocked, &[]);
    assert_eq!(vacation.reason.as_deref(), Some("Vacation"));

    let lunch = is_slot_blocked(date(2024, 6, 11), time(12, 15), 30, &blocked, &[]);
    assert_eq!(lunch.reason.as_deref(), Some("Lunch"));
}

#[test]
fn empty_reason_falls_back_to_default() {
    let day = date(2024, 6, 10);
    let blocked = vec![block(day, 12, 0, 13, 0).with_reason("")];

    let check = is_slot_blocked(day, time(12, 30), 15, &blocked, &[]);

    assert_eq!(check.reason.as_deref(), Some(BLOCKED_REASON));
}

#[test]
fn candidate_start_inside_block_is_blocked() {
    let day = date(2024, 6, 10);
    let blocked = vec![block(day, 12, 0, 13, 0)];

    let check = is_slot_blocked(day, time(12, 45), 30, &blocked, &[]);

    assert!(check.blocked);
    assert_eq!(check.reason.as_deref(), Some(BLOCKED_REASON));
}

#[test]
fn candidate_end_touching_block_start_is_blocked() {
    // 09:00 + 60 = 10:00 == block start; the inclusive test counts it.
    let day = date(2024, 6, 10);
    let blocked = vec![block(day, 10, 0, 11, 0)];

    let check = is_slot_blocked(day, time(9, 0), 60, &blocked, &[]);

    assert!(check.blocked);
}

#[test]
fn candidate_clear_of_block_is_free() {
    let day = date(2024, 6, 10);
    let blocked = vec![block(day, 12, 0, 13, 0)];

    assert!(!is_slot_blocked(day, time(11, 0), 30, &blocked, &[]).blocked);
    assert!(!is_slot_blocked(day, time(13, 15), 30, &blocked, &[]).blocked);
}

#[test]
fn appointment_overlap_on_start_is_blocked() {
    // Existing 10:00-10:30; candidate 10:15 starts inside it.
    let day = date(2024, 6, 10);
    let appointments = vec![appointment(day, 10, 0, 30)];

    let check = is_slot_blocked(day, time(10, 15), 30, &[], &appointments);

    assert!(check.blocked);
    assert_eq!(check.reason.as_deref(), Some(APPOINTMENT_REASON));
}

#[test]
fn candidate_starting_at_appointment_end_is_blocked() {
    // 10:30 is within [10:00, 10:30] under the inclusive test.
    let day = date(2024, 6, 10);
    let appointments = vec![appointment(day, 10, 0, 30)];

    let check = is_slot_blocked(day, time(10, 30), 30, &[], &appointments);

    assert!(check.blocked, "boundary instant counts as inside");
}

#[test]
fn candidate_ending_at_appointment_start_is_blocked() {
    let day = date(2024, 6, 10);
    let appointments = vec![appointment(day, 10, 0, 30)];

    assert!(is_slot_blocked(day, time(9, 30), 30, &[], &appointments).blocked);
    assert!(!is_slot_blocked(day, time(9, 0), 30, &[], &appointments).blocked);
    assert!(!is_slot_blocked(day, time(10, 45), 30, &[], &appointments).blocked);
}

#[test]
fn appointments_on_other_dates_are_ignored() {
    let appointments = vec![appointment(date(2024, 6, 11), 10, 0, 30)];

    let check = is_slot_blocked(date(2024, 6, 10), time(10, 0), 30, &[], &appointments);

    assert!(!check.blocked);
}

#[test]
fn candidate_containing_whole_block_is_not_detected() {
    // Candidate [09:00, 11:00] swallows block [09:30, 10:00]; neither
    // endpoint lies inside it, so the boundary-touch rule lets it through.
    let day = date(2024, 6, 10);
    let blocked = vec![block(day, 9, 30, 10, 0)];

    let check = is_slot_blocked(day, time(9, 0), 120, &blocked, &[]);

    assert!(!check.blocked);
}

#[test]
fn overlap_rule_detects_contained_block() {
    let day = date(2024, 6, 10);
    let blocked = vec![block(day, 9, 30, 10, 0)];
    let candidate = CandidateSlot::new(day, time(9, 0), 120);

    let check = is_slot_blocked_with(&candidate, &blocked, &[], OverlapRule::Overlap);

    assert!(check.blocked);
    assert_eq!(check.reason.as_deref(), Some(BLOCKED_REASON));
}

#[test]
fn overlap_rule_treats_adjacency_as_free() {
    let day = date(2024, 6, 10);
    let appointments = vec![appointment(day, 10, 0, 30)];
    let candidate = CandidateSlot::new(day, time(10, 30), 30);

    let check = is_slot_blocked_with(&candidate, &[], &appointments, OverlapRule::Overlap);

    assert!(!check.blocked);
}

#[test]
fn blocked_intervals_are_checked_before_appointments() {
    let day = date(2024, 6, 10);
    let blocked = vec![block(day, 10, 0, 11, 0).with_reason("Staff meeting")];
    let appointments = vec![appointment(day, 10, 0, 30)];

    let check = is_slot_blocked(day, time(10, 15), 30, &blocked, &appointments);

    assert_eq!(check.reason.as_deref(), Some("Staff meeting"));
}

#[test]
fn first_matching_block_wins() {
    let day = date(2024, 6, 10);
    let blocked = vec![
        block(day, 14, 0, 15, 0).with_reason("unrelated"),
        block(day, 10, 0, 11, 0).with_reason("first"),
        block(day, 10, 0, 12, 0).with_reason("second"),
    ];

    let check = is_slot_blocked(day, time(10, 30), 15, &blocked, &[]);

    assert_eq!(check.reason.as_deref(), Some("first"));
}

#[test]
fn inverted_block_is_normalized() {
    let day = date(2024, 6, 10);
    let blocked = vec![block(day, 11, 0, 10, 0)];

    let check = is_slot_blocked(day, time(10, 30), 15, &blocked, &[]);

    assert!(check.blocked, "end-before-start interval still covers 10:00-11:00");
}

#[test]
fn negative_duration_is_applied_literally() {
    // 10:45 - 30 min = 10:15, which lies inside [10:00, 10:20].
    let day = date(2024, 6, 10);
    let blocked = vec![block(day, 10, 0, 10, 20)];

    let check = is_slot_blocked(day, time(10, 45), -30, &blocked, &[]);

    assert!(check.blocked);
}

#[test]
fn default_rule_matches_plain_entry_point() {
    let day = date(2024, 6, 10);
    let blocked = vec![block(day, 9, 30, 10, 0)];
    let appointments = vec![appointment(day, 13, 0, 60)];

    for (hour, min) in [(9, 0), (9, 45), (12, 30), (14, 0), (15, 0)] {
        let candidate = CandidateSlot::new(day, time(hour, min), 45);
        assert_eq!(
            is_slot_blocked(day, time(hour, min), 45, &blocked, &appointments),
            is_slot_blocked_with(&candidate, &blocked, &appointments, OverlapRule::BoundaryTouch),
        );
    }
}
