//! Enumerate bookable start times across a business day.
//!
//! Walks `[open, close)` in fixed 15-minute steps and runs the conflict checker
//! on each step as if it were a candidate of the requested duration.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::conflict::{is_slot_blocked_with, OverlapRule};
use crate::hours::BusinessHours;
use crate::model::{BlockedInterval, CandidateSlot, ExistingAppointment, TimeSlot};
use crate::time::{add_minutes, format_time_label, truncate_to_minute};

/// Distance between consecutive slot start times.
pub const SLOT_STEP_MINUTES: i64 = 15;

/// Knobs for enumeration. Defaults: boundary-touch overlap, no closing-time fit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotOptions {
    pub overlap: OverlapRule,
    /// Mark a slot unavailable when its end runs past closing time.
    pub fit_within_hours: bool,
}

/// Number of slots [`list_available_slots`] emits for `hours`.
///
/// Partial steps count, including a closing time a few seconds past a step.
pub fn slot_count(hours: &BusinessHours) -> usize {
    let seconds = (hours.end - hours.start).num_seconds().max(0);
    let step = SLOT_STEP_MINUTES * 60;
    ((seconds + step - 1) / step) as usize
}

/// List every slot in `hours` on `date`, with the default options.
///
/// A slot's own end time is not compared with closing time, so a long service
/// can be offered shortly before close.
pub fn list_available_slots(
    date: NaiveDate,
    duration_minutes: i64,
    blocked: &[BlockedInterval],
    appointments: &[ExistingAppointment],
    hours: BusinessHours,
) -> Vec<TimeSlot> {
    list_available_slots_with(
        date,
        duration_minutes,
        blocked,
        appointments,
        hours,
        &SlotOptions::default(),
    )
}

/// List every slot in `hours` on `date` using explicit [`SlotOptions`].
pub fn list_available_slots_with(
    date: NaiveDate,
    duration_minutes: i64,
    blocked: &[BlockedInterval],
    appointments: &[ExistingAppointment],
    hours: BusinessHours,
    options: &SlotOptions,
) -> Vec<TimeSlot> {
    let open = date.and_time(hours.start);
    let close = date.and_time(hours.end);
    let step = Duration::minutes(SLOT_STEP_MINUTES);

    let mut slots = Vec::with_capacity(slot_count(&hours));
    let mut cursor = open;

    while cursor < close {
        let label_time = truncate_to_minute(cursor.time());
        let candidate = CandidateSlot::new(date, label_time, duration_minutes);
        let check = is_slot_blocked_with(&candidate, blocked, appointments, options.overlap);

        let overruns = options.fit_within_hours && add_minutes(cursor, duration_minutes) > close;
        let available = !check.blocked && !overruns;

        trace!(%date, time = %label_time, available, "enumerated slot");

        slots.push(TimeSlot {
            time: format_time_label(label_time),
            available,
        });
        cursor += step;
    }

    slots
}
