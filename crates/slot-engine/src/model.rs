//! Records consumed and produced by the availability routines.
//!
//! `BlockedInterval` and `ExistingAppointment` mirror the stored booking
//! documents (camelCase on the wire); unknown document fields are ignored.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::{self, add_minutes};

/// How a blocked interval repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// RFC 5545 `FREQ` value, or `None` for one-off intervals.
    pub fn rrule_freq(self) -> Option<&'static str> {
        match self {
            Recurrence::None => None,
            Recurrence::Daily => Some("DAILY"),
            Recurrence::Weekly => Some("WEEKLY"),
            Recurrence::Monthly => Some("MONTHLY"),
        }
    }
}

/// A span during which nothing may be booked (vacation, break, closure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedInterval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(with = "time::local_datetime")]
    pub start_time: NaiveDateTime,
    #[serde(with = "time::local_datetime")]
    pub end_time: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub is_all_day: bool,
}

impl BlockedInterval {
    /// A one-off block over `[start, end]`.
    pub fn new(start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            id: None,
            start_time,
            end_time,
            reason: None,
            recurrence: Recurrence::None,
            is_all_day: false,
        }
    }

    /// A block covering the whole of `date`, stored as `00:00:00`–`23:59:59`.
    pub fn all_day(date: NaiveDate) -> Self {
        let (start, end) = time::day_window(date);
        Self {
            is_all_day: true,
            ..Self::new(start, end)
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// The stored reason, or `default` when it is missing or empty.
    pub fn reason_or(&self, default: &str) -> String {
        match self.reason.as_deref() {
            Some(reason) if !reason.is_empty() => reason.to_string(),
            _ => default.to_string(),
        }
    }
}

/// The conflict-relevant part of a booked appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingAppointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "time::clock_time")]
    pub time: NaiveTime,
    /// Length in minutes.
    pub duration: i64,
}

impl ExistingAppointment {
    pub fn new(date: NaiveDate, time: NaiveTime, duration: i64) -> Self {
        Self {
            id: None,
            date,
            time,
            duration,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn end(&self) -> NaiveDateTime {
        add_minutes(self.start(), self.duration)
    }
}

/// A proposed booking. Never persisted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSlot {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i64,
}

impl CandidateSlot {
    pub fn new(date: NaiveDate, time: NaiveTime, duration_minutes: i64) -> Self {
        Self {
            date,
            time,
            duration_minutes,
        }
    }

    /// Build a candidate from raw `YYYY-MM-DD` / `HH:MM` strings.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidDate` or `SlotError::InvalidTime` when either
    /// string does not parse.
    pub fn parse(date: &str, time: &str, duration_minutes: i64) -> Result<Self> {
        Ok(Self::new(
            time::parse_date(date)?,
            time::parse_time(time)?,
            duration_minutes,
        ))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn end(&self) -> NaiveDateTime {
        add_minutes(self.start(), self.duration_minutes)
    }
}

/// One enumerated start time and whether it can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// `HH:MM` label.
    pub time: String,
    pub available: bool,
}

/// Outcome of checking one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotCheck {
    pub blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SlotCheck {
    pub fn free() -> Self {
        Self::default()
    }

    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            blocked: true,
            reason: Some(reason.into()),
        }
    }
}
