//! Engine configuration loaded from TOML.
//!
//! ```toml
//! timezone = "America/New_York"
//!
//! [booking]
//! enabled = true
//! min_advance_hours = 24
//! max_advance_days = 30
//!
//! [hours]
//! monday = "9:00 AM - 5:00 PM"
//! saturday = "Closed"
//!
//! [slots]
//! overlap = "boundary-touch"
//! fit_within_hours = false
//! ```
//!
//! Every section is optional and falls back to its defaults.

use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::booking::BookingPolicy;
use crate::error::{Result, SlotError};
use crate::hours::WeeklyHours;
use crate::slots::SlotOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IANA timezone the business operates in.
    pub timezone: String,
    pub booking: BookingPolicy,
    pub hours: WeeklyHours,
    pub slots: SlotOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: "America/New_York".to_string(),
            booking: BookingPolicy::default(),
            hours: WeeklyHours::default(),
            slots: SlotOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SlotError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        info!("Loading config from: {}", path.display());
        content.parse()
    }

    /// The configured timezone.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimezone` if `timezone` is not an IANA identifier.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| SlotError::InvalidTimezone(self.timezone.clone()))
    }

    /// Check the timezone and every weekday's hours.
    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        self.hours.validate()?;
        Ok(())
    }
}

impl FromStr for EngineConfig {
    type Err = SlotError;

    /// Parse and validate configuration from a TOML string.
    fn from_str(content: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| SlotError::Config(e.to_string()))?;
        config.validate()?;
        debug!(?config, "parsed engine config");
        Ok(config)
    }
}
