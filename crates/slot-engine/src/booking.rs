//! Booking-window policy applied before a public booking is accepted.
//!
//! Checks run in a fixed order: booking enabled, minimum notice, maximum
//! horizon, then the conflict checker. The first failure is reported.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::conflict::{is_slot_blocked_with, OverlapRule};
use crate::model::{BlockedInterval, CandidateSlot, ExistingAppointment};
use crate::time::add_minutes;

/// Online booking rules for one business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingPolicy {
    pub enabled: bool,
    /// Minimum notice, in hours, between now and the appointment start.
    pub min_advance_hours: u32,
    /// How far ahead, in days, an appointment may be booked.
    pub max_advance_days: u32,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            min_advance_hours: 24,
            max_advance_days: 30,
        }
    }
}

/// Why a booking was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    Disabled,
    TooSoon { min_advance_hours: u32 },
    TooFar { max_advance_days: u32 },
    Conflict { reason: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Disabled => write!(f, "Online booking is currently disabled"),
            Rejection::TooSoon { min_advance_hours } => write!(
                f,
                "Appointments must be booked at least {} hours in advance",
                min_advance_hours
            ),
            Rejection::TooFar { max_advance_days } => write!(
                f,
                "Appointments cannot be booked more than {} days in advance",
                max_advance_days
            ),
            Rejection::Conflict { reason } => write!(f, "{}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingDecision {
    Accepted,
    Rejected(Rejection),
}

impl BookingDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BookingDecision::Accepted)
    }

    /// User-facing message for a rejection.
    pub fn message(&self) -> Option<String> {
        match self {
            BookingDecision::Accepted => None,
            BookingDecision::Rejected(rejection) => Some(rejection.to_string()),
        }
    }
}

/// Validate a public booking request at `now`.
///
/// `now` is supplied by the caller in business-local time; nothing here reads
/// the system clock.
pub fn validate_booking(
    now: NaiveDateTime,
    candidate: &CandidateSlot,
    policy: &BookingPolicy,
    blocked: &[BlockedInterval],
    appointments: &[ExistingAppointment],
    rule: OverlapRule,
) -> BookingDecision {
    if !policy.enabled {
        return BookingDecision::Rejected(Rejection::Disabled);
    }

    let start = candidate.start();

    let earliest = add_minutes(now, i64::from(policy.min_advance_hours) * 60);
    if start < earliest {
        return BookingDecision::Rejected(Rejection::TooSoon {
            min_advance_hours: policy.min_advance_hours,
        });
    }

    let latest = add_minutes(now, i64::from(policy.max_advance_days) * 24 * 60);
    if start > latest {
        return BookingDecision::Rejected(Rejection::TooFar {
            max_advance_days: policy.max_advance_days,
        });
    }

    let check = is_slot_blocked_with(candidate, blocked, appointments, rule);
    if check.blocked {
        return BookingDecision::Rejected(Rejection::Conflict {
            reason: check
                .reason
                .unwrap_or_else(|| "This time slot is not available".to_string()),
        });
    }

    BookingDecision::Accepted
}
