//! WASM bindings for slot-engine.
//!
//! Exposes conflict checking, slot enumeration and recurring-block expansion to
//! JavaScript via `wasm-bindgen`. Schedules cross the boundary as JSON strings
//! in the stored document shape (`startTime`, `endTime`, `isAllDay`, ... for
//! blocked times; `date`, `time`, `duration` for appointments).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::Serialize;
use slot_engine::time::{parse_date, parse_local_datetime, parse_time};
use slot_engine::{
    BlockedInterval, BusinessHours, CandidateSlot, ExistingAppointment, OverlapRule,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON helpers (kept free of JsValue so they run on native targets too)
// ---------------------------------------------------------------------------

fn parse_blocked_json(json: &str) -> Result<Vec<BlockedInterval>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid blocked times JSON: {}", e))
}

fn parse_appointments_json(json: &str) -> Result<Vec<ExistingAppointment>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid appointments JSON: {}", e))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn check_json(
    date: &str,
    time: &str,
    duration_minutes: i64,
    blocked_json: &str,
    appointments_json: &str,
) -> Result<String, String> {
    let candidate = CandidateSlot::parse(date, time, duration_minutes).map_err(|e| e.to_string())?;
    let blocked = parse_blocked_json(blocked_json)?;
    let appointments = parse_appointments_json(appointments_json)?;

    let check = slot_engine::is_slot_blocked_with(
        &candidate,
        &blocked,
        &appointments,
        OverlapRule::default(),
    );
    to_json(&check)
}

fn list_json(
    date: &str,
    duration_minutes: i64,
    blocked_json: &str,
    appointments_json: &str,
    open: Option<&str>,
    close: Option<&str>,
) -> Result<String, String> {
    let date = parse_date(date).map_err(|e| e.to_string())?;
    let blocked = parse_blocked_json(blocked_json)?;
    let appointments = parse_appointments_json(appointments_json)?;

    let defaults = BusinessHours::default();
    let hours = BusinessHours::new(
        open.map(parse_time)
            .transpose()
            .map_err(|e| e.to_string())?
            .unwrap_or(defaults.start),
        close
            .map(parse_time)
            .transpose()
            .map_err(|e| e.to_string())?
            .unwrap_or(defaults.end),
    );

    let slots =
        slot_engine::list_available_slots(date, duration_minutes, &blocked, &appointments, hours);
    to_json(&slots)
}

fn expand_json(blocked_json: &str, window_start: &str, window_end: &str) -> Result<String, String> {
    let blocked = parse_blocked_json(blocked_json)?;
    let start = parse_local_datetime(window_start).map_err(|e| e.to_string())?;
    let end = parse_local_datetime(window_end).map_err(|e| e.to_string())?;

    let materialized = slot_engine::materialize_blocked_intervals(&blocked, start, end)
        .map_err(|e| e.to_string())?;
    to_json(&materialized)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Check whether one candidate appointment collides with blocked time or an
/// existing appointment.
///
/// Returns a JSON string `{"blocked": bool, "reason"?: string}`.
///
/// # Arguments
/// - `date` -- `YYYY-MM-DD`
/// - `time` -- `HH:MM`
/// - `duration_minutes` -- Length of the requested service
/// - `blocked_json` -- JSON array of blocked-time documents
/// - `appointments_json` -- JSON array of appointment documents
#[wasm_bindgen(js_name = "isSlotBlocked")]
pub fn is_slot_blocked(
    date: &str,
    time: &str,
    duration_minutes: i32,
    blocked_json: &str,
    appointments_json: &str,
) -> Result<String, JsValue> {
    check_json(
        date,
        time,
        i64::from(duration_minutes),
        blocked_json,
        appointments_json,
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// List every 15-minute slot of a business day with its availability.
///
/// `open` and `close` default to `09:00` and `17:00`. Returns a JSON array of
/// `{time, available}` objects in chronological order.
#[wasm_bindgen(js_name = "listAvailableSlots")]
pub fn list_available_slots(
    date: &str,
    duration_minutes: i32,
    blocked_json: &str,
    appointments_json: &str,
    open: Option<String>,
    close: Option<String>,
) -> Result<String, JsValue> {
    list_json(
        date,
        i64::from(duration_minutes),
        blocked_json,
        appointments_json,
        open.as_deref(),
        close.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Materialize recurring blocked times into the occurrences touching a window.
///
/// `window_start` and `window_end` are local datetimes (`YYYY-MM-DDTHH:MM[:SS]`).
/// Returns a JSON array of blocked-time documents with `recurrence: "none"`.
#[wasm_bindgen(js_name = "expandBlockedTimes")]
pub fn expand_blocked_times(
    blocked_json: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, JsValue> {
    expand_json(blocked_json, window_start, window_end).map_err(|e| JsValue::from_str(&e))
}
