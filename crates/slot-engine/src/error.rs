//! Error types for slot-engine operations.
//!
//! The conflict checker and slot enumerator never fail. Errors only come from
//! the edges: parsing raw strings, expanding recurrences, loading config, and
//! talking to a [`ScheduleStore`](crate::store::ScheduleStore).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid datetime '{0}'")]
    InvalidDateTime(String),

    #[error("Invalid business hours: {0}")]
    InvalidHours(String),

    #[error("Invalid recurrence: {0}")]
    InvalidRecurrence(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schedule store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
