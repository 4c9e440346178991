//! The persistence seam the availability routines read snapshots through.
//!
//! Every call names the business explicitly. Nothing in this crate keeps an
//! ambient "current business".

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::booking::{validate_booking, BookingDecision, BookingPolicy};
use crate::conflict::{is_slot_blocked_with, OverlapRule};
use crate::error::Result;
use crate::hours::BusinessHours;
use crate::model::{BlockedInterval, CandidateSlot, ExistingAppointment, SlotCheck, TimeSlot};
use crate::recurrence::materialize_blocked_intervals;
use crate::slots::{list_available_slots_with, SlotOptions};
use crate::time::{add_minutes, day_window};

/// Identifier of a tenant business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(String);

impl BusinessId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of blocked intervals and appointments for a business.
pub trait ScheduleStore: Send + Sync {
    /// All blocked intervals of `business`, as stored (recurrences unexpanded).
    fn blocked_intervals(&self, business: &BusinessId) -> Result<Vec<BlockedInterval>>;

    /// All appointments of `business`. Date filtering is left to the checker.
    fn appointments(&self, business: &BusinessId) -> Result<Vec<ExistingAppointment>>;
}

/// One business's schedule data, in the stored document shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    #[serde(default)]
    pub blocked_times: Vec<BlockedInterval>,
    #[serde(default)]
    pub appointments: Vec<ExistingAppointment>,
}

/// In-process store keyed by business.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tenants: HashMap<BusinessId, ScheduleSnapshot>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_snapshot(&mut self, business: BusinessId, snapshot: ScheduleSnapshot) {
        self.tenants.insert(business, snapshot);
    }

    pub fn add_blocked_interval(&mut self, business: &BusinessId, interval: BlockedInterval) {
        self.tenants
            .entry(business.clone())
            .or_default()
            .blocked_times
            .push(interval);
    }

    pub fn add_appointment(&mut self, business: &BusinessId, appointment: ExistingAppointment) {
        self.tenants
            .entry(business.clone())
            .or_default()
            .appointments
            .push(appointment);
    }
}

impl ScheduleStore for InMemoryStore {
    /// Ordered by start time; unknown businesses have no blocks.
    fn blocked_intervals(&self, business: &BusinessId) -> Result<Vec<BlockedInterval>> {
        let mut blocked = self
            .tenants
            .get(business)
            .map(|s| s.blocked_times.clone())
            .unwrap_or_default();
        blocked.sort_by_key(|b| b.start_time);
        Ok(blocked)
    }

    fn appointments(&self, business: &BusinessId) -> Result<Vec<ExistingAppointment>> {
        Ok(self
            .tenants
            .get(business)
            .map(|s| s.appointments.clone())
            .unwrap_or_default())
    }
}

/// Window of blocked time that can affect a candidate starting on `date`.
fn candidate_window(date: NaiveDate, duration_minutes: i64) -> (NaiveDateTime, NaiveDateTime) {
    let (start, end) = day_window(date);
    (start, end.max(add_minutes(end, duration_minutes)))
}

/// Fetch a snapshot for `business` and enumerate the slots of `date`.
///
/// Recurring blocks are materialized over the day before enumeration.
///
/// # Errors
/// Propagates store failures and recurrence expansion failures.
pub fn day_availability<S: ScheduleStore + ?Sized>(
    store: &S,
    business: &BusinessId,
    date: NaiveDate,
    duration_minutes: i64,
    hours: BusinessHours,
    options: &SlotOptions,
) -> Result<Vec<TimeSlot>> {
    let blocked = store.blocked_intervals(business)?;
    let appointments = store.appointments(business)?;

    let (window_start, window_end) = candidate_window(date, duration_minutes);
    let blocked = materialize_blocked_intervals(&blocked, window_start, window_end)?;

    Ok(list_available_slots_with(
        date,
        duration_minutes,
        &blocked,
        &appointments,
        hours,
        options,
    ))
}

/// Fetch a snapshot for `business` and check one candidate against it.
///
/// # Errors
/// Propagates store failures and recurrence expansion failures.
pub fn check_slot<S: ScheduleStore + ?Sized>(
    store: &S,
    business: &BusinessId,
    candidate: &CandidateSlot,
    rule: OverlapRule,
) -> Result<SlotCheck> {
    let blocked = store.blocked_intervals(business)?;
    let appointments = store.appointments(business)?;

    let (window_start, window_end) = candidate_window(candidate.date, candidate.duration_minutes);
    let blocked = materialize_blocked_intervals(&blocked, window_start, window_end)?;

    Ok(is_slot_blocked_with(candidate, &blocked, &appointments, rule))
}

/// Fetch a snapshot for `business` and run the booking policy on a candidate.
///
/// # Errors
/// Propagates store failures and recurrence expansion failures.
pub fn validate_slot<S: ScheduleStore + ?Sized>(
    store: &S,
    business: &BusinessId,
    now: NaiveDateTime,
    candidate: &CandidateSlot,
    policy: &BookingPolicy,
    rule: OverlapRule,
) -> Result<BookingDecision> {
    let blocked = store.blocked_intervals(business)?;
    let appointments = store.appointments(business)?;

    let (window_start, window_end) = candidate_window(candidate.date, candidate.duration_minutes);
    let blocked = materialize_blocked_intervals(&blocked, window_start, window_end)?;

    Ok(validate_booking(now, candidate, policy, &blocked, &appointments, rule))
}
