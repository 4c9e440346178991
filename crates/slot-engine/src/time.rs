//! Time arithmetic and parsing helpers shared by the checker and enumerator.
//!
//! All instants are business-local wall-clock values (`NaiveDateTime`). Stored
//! documents never carry an offset for booking data, so nothing here converts
//! between zones; RFC 3339 input is reduced to its local wall-clock reading.

use crate::error::{Result, SlotError};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Format used for slot labels and serialized appointment times.
pub const TIME_LABEL_FORMAT: &str = "%H:%M";

/// Format used when serializing local datetimes.
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| SlotError::InvalidDate(s.to_string()))
}

/// Parse a time of day. Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| SlotError::InvalidTime(s.to_string()))
}

/// Parse a local datetime.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]`, the same with a space separator, and
/// RFC 3339 strings (the offset is dropped, keeping the wall-clock reading).
pub fn parse_local_datetime(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| SlotError::InvalidDateTime(s.to_string()))
}

/// Format a time of day as an `HH:MM` slot label.
pub fn format_time_label(time: NaiveTime) -> String {
    time.format(TIME_LABEL_FORMAT).to_string()
}

/// Drop seconds and sub-second precision, matching what an `HH:MM` label keeps.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// Add a (possibly negative) number of minutes, saturating at the representable range.
pub fn add_minutes(instant: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    Duration::try_minutes(minutes)
        .and_then(|d| instant.checked_add_signed(d))
        .unwrap_or(if minutes >= 0 {
            NaiveDateTime::MAX
        } else {
            NaiveDateTime::MIN
        })
}

/// Inclusive containment test on `[a, b]`.
///
/// The endpoints are ordered first, so an inverted interval is treated as the
/// span between its two instants rather than as empty.
pub fn within_inclusive(instant: NaiveDateTime, a: NaiveDateTime, b: NaiveDateTime) -> bool {
    let (lo, hi) = ordered(a, b);
    lo <= instant && instant <= hi
}

/// Return the two instants as `(earlier, later)`.
pub fn ordered(a: NaiveDateTime, b: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The whole calendar day `[00:00:00, 23:59:59]` as local instants.
pub fn day_window(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    (
        date.and_time(NaiveTime::MIN),
        date.and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| date.and_time(NaiveTime::MIN)),
    )
}

/// Serde adapter for local datetimes stored as strings.
///
/// Serializes as `YYYY-MM-DDTHH:MM:SS`; deserializes anything
/// [`parse_local_datetime`] accepts.
pub mod local_datetime {
    use super::{parse_local_datetime, LOCAL_DATETIME_FORMAT};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&dt.format(LOCAL_DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_local_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `HH:MM` times of day.
pub mod clock_time {
    use super::{parse_time, TIME_LABEL_FORMAT};
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_LABEL_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
