//! Materialize recurring blocked intervals into concrete occurrences.
//!
//! The checker only ever sees flat occurrences. This module turns a stored
//! `daily`/`weekly`/`monthly` block into the occurrences touching a window,
//! using the `rrule` crate for RFC 5545 semantics. Blocked times are
//! business-local wall-clock values, so expansion runs in UTC and the result
//! is read back as a naive local instant.

use chrono::{NaiveDateTime, TimeZone, Utc};
use rrule::RRuleSet;
use tracing::{debug, warn};

use crate::error::{Result, SlotError};
use crate::model::{BlockedInterval, Recurrence};
use crate::time::add_minutes;

/// Upper bound on occurrences generated per interval.
pub const MAX_OCCURRENCES: u16 = 500;

const ICAL_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Expand one blocked interval into the occurrences touching `[window_start, window_end]`.
///
/// Each occurrence keeps the original length, reason and all-day flag, and
/// carries `Recurrence::None`. A one-off interval is returned as-is when it
/// touches the window.
///
/// Monthly rules follow RFC 5545: a block starting on the 31st skips months
/// that have no 31st.
///
/// # Errors
/// Returns `SlotError::InvalidRecurrence` if the rule cannot be built or parsed.
pub fn expand_blocked_interval(
    interval: &BlockedInterval,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Result<Vec<BlockedInterval>> {
    let Some(freq) = interval.recurrence.rrule_freq() else {
        return Ok(if touches(interval, window_start, window_end) {
            vec![interval.clone()]
        } else {
            Vec::new()
        });
    };

    if window_start > window_end || interval.start_time > window_end {
        return Ok(Vec::new());
    }

    let length = interval.end_time - interval.start_time;

    let rrule_text = format!(
        "DTSTART;TZID=UTC:{}\nRRULE:FREQ={};UNTIL={}Z",
        interval.start_time.format(ICAL_FORMAT),
        freq,
        window_end.format(ICAL_FORMAT),
    );

    let rrule_set: RRuleSet = rrule_text
        .parse()
        .map_err(|e| SlotError::InvalidRecurrence(format!("{}", e)))?;

    // Occurrences starting earlier than this cannot reach the window.
    let earliest = add_minutes(window_start, -(length.num_minutes().max(0) + 1));
    let rrule_set = if earliest > interval.start_time {
        rrule_set.after(rrule::Tz::UTC.from_utc_datetime(&earliest))
    } else {
        rrule_set
    };

    let instances = rrule_set.all(MAX_OCCURRENCES);
    if instances.limited {
        warn!(
            start = %interval.start_time,
            %window_start,
            %window_end,
            limit = MAX_OCCURRENCES,
            "recurring block expansion hit the occurrence cap"
        );
    }

    let occurrences: Vec<BlockedInterval> = instances
        .dates
        .into_iter()
        .map(|dt| {
            let start = dt.with_timezone(&Utc).naive_utc();
            BlockedInterval {
                start_time: start,
                end_time: start + length,
                recurrence: Recurrence::None,
                ..interval.clone()
            }
        })
        .filter(|occurrence| touches(occurrence, window_start, window_end))
        .collect();

    debug!(
        start = %interval.start_time,
        recurrence = ?interval.recurrence,
        count = occurrences.len(),
        "expanded recurring block"
    );

    Ok(occurrences)
}

/// Expand every interval, keeping input order: all occurrences of one interval
/// precede those of the next.
pub fn materialize_blocked_intervals(
    intervals: &[BlockedInterval],
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Result<Vec<BlockedInterval>> {
    let mut materialized = Vec::with_capacity(intervals.len());
    for interval in intervals {
        materialized.extend(expand_blocked_interval(interval, window_start, window_end)?);
    }
    Ok(materialized)
}

fn touches(
    interval: &BlockedInterval,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> bool {
    let lo = interval.start_time.min(interval.end_time);
    let hi = interval.start_time.max(interval.end_time);
    hi >= window_start && lo <= window_end
}
