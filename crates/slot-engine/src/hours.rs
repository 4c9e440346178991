//! Business hours: the daily window slots are enumerated in.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::time::{self, parse_time};

/// Opening and closing time for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    #[serde(with = "time::clock_time")]
    pub start: NaiveTime,
    #[serde(with = "time::clock_time")]
    pub end: NaiveTime,
}

impl Default for BusinessHours {
    /// 09:00–17:00.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl BusinessHours {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parse `HH:MM` opening and closing times.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTime` if either value does not parse.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(parse_time(start)?, parse_time(end)?))
    }

    /// Whole minutes between opening and closing; zero when closing is not after opening.
    pub fn open_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes().max(0)
    }
}

/// Parse one day's hours as stored in business settings.
///
/// Accepts `"9:00 AM - 5:00 PM"`, `"09:00-17:00"` and `"Closed"`
/// (case-insensitive, yields `None`).
///
/// # Errors
/// Returns `SlotError::InvalidHours` for anything else.
pub fn parse_day_hours(raw: &str) -> Result<Option<BusinessHours>> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("closed") {
        return Ok(None);
    }

    let (open, close) = trimmed
        .split_once('-')
        .ok_or_else(|| SlotError::InvalidHours(format!("expected 'open - close', got '{}'", raw)))?;

    let start = parse_clock(open.trim())
        .ok_or_else(|| SlotError::InvalidHours(format!("bad opening time in '{}'", raw)))?;
    let end = parse_clock(close.trim())
        .ok_or_else(|| SlotError::InvalidHours(format!("bad closing time in '{}'", raw)))?;

    Ok(Some(BusinessHours::new(start, end)))
}

/// 12-hour clock with AM/PM first, then 24-hour.
fn parse_clock(s: &str) -> Option<NaiveTime> {
    const FORMATS: [&str; 4] = ["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// Per-weekday opening hours as free-form strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyHours {
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
}

impl Default for WeeklyHours {
    fn default() -> Self {
        let weekday = "9:00 AM - 5:00 PM".to_string();
        let closed = "Closed".to_string();
        Self {
            monday: weekday.clone(),
            tuesday: weekday.clone(),
            wednesday: weekday.clone(),
            thursday: weekday.clone(),
            friday: weekday,
            saturday: closed.clone(),
            sunday: closed,
        }
    }
}

impl WeeklyHours {
    pub fn raw_for(&self, weekday: Weekday) -> &str {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    /// Opening hours on `date`, or `None` when the business is closed.
    pub fn hours_for(&self, date: NaiveDate) -> Result<Option<BusinessHours>> {
        parse_day_hours(self.raw_for(date.weekday()))
    }

    /// Check that every weekday entry parses.
    pub fn validate(&self) -> Result<()> {
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            parse_day_hours(self.raw_for(weekday))?;
        }
        Ok(())
    }
}
