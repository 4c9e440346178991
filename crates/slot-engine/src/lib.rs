//! # slot-engine
//!
//! Deterministic appointment slot availability for booking systems.
//!
//! Given a date, a service duration, the business's blocked intervals and its
//! existing appointments, the engine decides whether one candidate slot can be
//! booked and lists every 15-minute start time of a business day with its
//! availability. Both routines are pure: callers fetch a snapshot of the data
//! and pass it in.
//!
//! ## Modules
//!
//! - [`conflict`] - Check one candidate against blocks and appointments
//! - [`slots`] - Enumerate a day's slots at 15-minute granularity
//! - [`recurrence`] - Materialize daily/weekly/monthly blocks into occurrences
//! - [`hours`] - Business hours and weekly opening-hours parsing
//! - [`booking`] - Booking-window policy (notice, horizon, enabled)
//! - [`store`] - Per-business schedule source and snapshot-driven helpers
//! - [`config`] - TOML engine configuration
//! - [`model`] - Blocked intervals, appointments, candidates, slots
//! - [`time`] - Local time parsing and arithmetic
//! - [`error`] - Error types

pub mod booking;
pub mod config;
pub mod conflict;
pub mod error;
pub mod hours;
pub mod model;
pub mod recurrence;
pub mod slots;
pub mod store;
pub mod time;

pub use booking::{validate_booking, BookingDecision, BookingPolicy, Rejection};
pub use config::EngineConfig;
pub use conflict::{is_slot_blocked, is_slot_blocked_with, OverlapRule};
pub use error::SlotError;
pub use hours::{BusinessHours, WeeklyHours};
pub use model::{
    BlockedInterval, CandidateSlot, ExistingAppointment, Recurrence, SlotCheck, TimeSlot,
};
pub use recurrence::{expand_blocked_interval, materialize_blocked_intervals};
pub use slots::{list_available_slots, list_available_slots_with, SlotOptions};
pub use store::{BusinessId, InMemoryStore, ScheduleSnapshot, ScheduleStore};
