//! Decide whether a candidate appointment collides with blocked time or bookings.
//!
//! Blocked intervals are checked before appointments, each collection in input
//! order, and the first collision decides the reported reason.
//!
//! The default [`OverlapRule::BoundaryTouch`] only asks whether the candidate's
//! start or end instant lies inside an exclusion (both ends inclusive). A
//! candidate that swallows a whole block is therefore not reported.
//! [`OverlapRule::Overlap`] is the strict interval test for callers that opt in.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{BlockedInterval, CandidateSlot, ExistingAppointment, SlotCheck};
use crate::time::{ordered, within_inclusive};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub const ALL_DAY_REASON: &str = "This entire day is blocked";
pub const BLOCKED_REASON: &str = "This time slot is blocked";
pub const APPOINTMENT_REASON: &str = "Another appointment is scheduled for this time";

/// How a candidate is tested against one exclusion span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapRule {
    /// Candidate start or candidate end lies within `[start, end]`.
    #[default]
    BoundaryTouch,
    /// `a.start < b.end && b.start < a.end`. Adjacent spans do not collide.
    Overlap,
}

impl OverlapRule {
    /// Does the candidate `[start, end]` collide with `[other_start, other_end]`?
    pub fn collides(
        self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        other_start: NaiveDateTime,
        other_end: NaiveDateTime,
    ) -> bool {
        match self {
            OverlapRule::BoundaryTouch => {
                within_inclusive(start, other_start, other_end)
                    || within_inclusive(end, other_start, other_end)
            }
            OverlapRule::Overlap => {
                let (a_start, a_end) = ordered(start, end);
                let (b_start, b_end) = ordered(other_start, other_end);
                a_start < b_end && b_start < a_end
            }
        }
    }
}

/// Check one candidate `(date, time, duration)` with the default rule.
///
/// Never fails: a collision is a normal result, reported through
/// [`SlotCheck::blocked`] with the reason of the first match.
pub fn is_slot_blocked(
    date: NaiveDate,
    time: NaiveTime,
    duration_minutes: i64,
    blocked: &[BlockedInterval],
    appointments: &[ExistingAppointment],
) -> SlotCheck {
    is_slot_blocked_with(
        &CandidateSlot::new(date, time, duration_minutes),
        blocked,
        appointments,
        OverlapRule::default(),
    )
}

/// Check one candidate using an explicit [`OverlapRule`].
pub fn is_slot_blocked_with(
    candidate: &CandidateSlot,
    blocked: &[BlockedInterval],
    appointments: &[ExistingAppointment],
    rule: OverlapRule,
) -> SlotCheck {
    let start = candidate.start();
    let end = candidate.end();

    for interval in blocked {
        if interval.is_all_day && interval.start_time.date() == start.date() {
            debug!(
                date = %candidate.date,
                time = %candidate.time,
                "slot falls on an all-day block"
            );
            return SlotCheck::blocked(interval.reason_or(ALL_DAY_REASON));
        }

        if rule.collides(start, end, interval.start_time, interval.end_time) {
            debug!(
                date = %candidate.date,
                time = %candidate.time,
                block_start = %interval.start_time,
                block_end = %interval.end_time,
                "slot collides with blocked interval"
            );
            return SlotCheck::blocked(interval.reason_or(BLOCKED_REASON));
        }
    }

    let booked = appointments
        .iter()
        .filter(|appointment| appointment.date == candidate.date)
        .find(|appointment| rule.collides(start, end, appointment.start(), appointment.end()));

    match booked {
        Some(appointment) => {
            debug!(
                date = %candidate.date,
                time = %candidate.time,
                booked_time = %appointment.time,
                "slot collides with existing appointment"
            );
            SlotCheck::blocked(APPOINTMENT_REASON)
        }
        None => SlotCheck::free(),
    }
}
