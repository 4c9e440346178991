//! `slots` CLI - check candidate appointments and list a day's bookable slots.
//!
//! ## Usage
//!
//! ```sh
//! # Is 10:15 for 30 minutes free? (schedule JSON on stdin)
//! cat schedule.json | slots check --date 2024-06-10 --time 10:15 --duration 30
//!
//! # List the day's 15-minute slots using the configured weekly hours
//! slots --config booking.toml list --date 2024-06-10 --duration 45 -i schedule.json
//!
//! # Override opening hours
//! slots list --date 2024-06-10 --duration 30 --start 10:00 --end 14:00 -i schedule.json
//!
//! # Apply the public booking policy (notice, horizon) as of a given instant
//! slots validate --date 2024-06-10 --time 10:00 --duration 30 --now 2024-06-01T09:00 -i schedule.json
//!
//! # Materialize recurring blocked times over a window
//! slots expand --from 2024-06-01 --to 2024-06-30 -i schedule.json -o blocks.json
//! ```
//!
//! The schedule file holds one business's documents:
//! `{"blockedTimes": [...], "appointments": [...]}`.
//! Set `RUST_LOG=debug` to see why slots are blocked.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::store::{check_slot, day_availability, validate_slot};
use slot_engine::time::{day_window, parse_date, parse_local_datetime, parse_time};
use slot_engine::{
    materialize_blocked_intervals, BusinessHours, BusinessId, CandidateSlot, EngineConfig,
    InMemoryStore, OverlapRule, ScheduleSnapshot,
};
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Business id the single-snapshot schedule file is loaded under.
const LOCAL_BUSINESS: &str = "local";

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Appointment slot availability and conflict checking"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether one candidate appointment is blocked
    Check {
        /// Appointment date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM)
        #[arg(long)]
        time: String,
        /// Service duration in minutes
        #[arg(long, allow_negative_numbers = true)]
        duration: i64,
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Use strict interval overlap instead of the configured rule
        #[arg(long)]
        strict: bool,
    },
    /// List every 15-minute slot of a day with its availability
    List {
        /// Day to enumerate (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Service duration in minutes
        #[arg(long, allow_negative_numbers = true)]
        duration: i64,
        /// Opening time (HH:MM); overrides the configured weekly hours
        #[arg(long)]
        start: Option<String>,
        /// Closing time (HH:MM); overrides the configured weekly hours
        #[arg(long)]
        end: Option<String>,
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Apply the booking policy and conflict check to one candidate
    Validate {
        /// Appointment date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM)
        #[arg(long)]
        time: String,
        /// Service duration in minutes
        #[arg(long, allow_negative_numbers = true)]
        duration: i64,
        /// Reference instant (YYYY-MM-DDTHH:MM); defaults to now in the business timezone
        #[arg(long)]
        now: Option<String>,
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Materialize recurring blocked times between two dates (inclusive)
    Expand {
        /// First day of the window (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Last day of the window (YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Serialize)]
struct ValidationOutput {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let business = BusinessId::new(LOCAL_BUSINESS);

    match cli.command {
        Commands::Check {
            date,
            time,
            duration,
            input,
            strict,
        } => {
            let candidate = CandidateSlot::parse(&date, &time, duration)?;
            let store = load_store(&business, input.as_deref())?;
            let rule = if strict {
                OverlapRule::Overlap
            } else {
                config.slots.overlap
            };

            let check = check_slot(&store, &business, &candidate, rule)
                .context("Failed to check slot")?;
            write_output(None, &serde_json::to_string_pretty(&check)?)?;
        }
        Commands::List {
            date,
            duration,
            start,
            end,
            input,
            output,
        } => {
            let day = parse_date(&date)?;
            let hours = match (start, end) {
                (None, None) => config
                    .hours
                    .hours_for(day)
                    .with_context(|| format!("Invalid configured hours for {}", day))?,
                (start, end) => {
                    let defaults = BusinessHours::default();
                    Some(BusinessHours::new(
                        start
                            .as_deref()
                            .map(parse_time)
                            .transpose()?
                            .unwrap_or(defaults.start),
                        end.as_deref()
                            .map(parse_time)
                            .transpose()?
                            .unwrap_or(defaults.end),
                    ))
                }
            };

            let slots = match hours {
                Some(hours) => {
                    let store = load_store(&business, input.as_deref())?;
                    day_availability(&store, &business, day, duration, hours, &config.slots)
                        .context("Failed to list slots")?
                }
                None => {
                    info!(%day, "business is closed");
                    Vec::new()
                }
            };
            write_output(output.as_deref(), &serde_json::to_string_pretty(&slots)?)?;
        }
        Commands::Validate {
            date,
            time,
            duration,
            now,
            input,
        } => {
            let candidate = CandidateSlot::parse(&date, &time, duration)?;
            let now = match now {
                Some(raw) => parse_local_datetime(&raw)?,
                None => business_now(&config)?,
            };
            let store = load_store(&business, input.as_deref())?;

            let decision = validate_slot(
                &store,
                &business,
                now,
                &candidate,
                &config.booking,
                config.slots.overlap,
            )
            .context("Failed to validate slot")?;

            let result = ValidationOutput {
                valid: decision.is_accepted(),
                message: decision.message(),
            };
            write_output(None, &serde_json::to_string_pretty(&result)?)?;
        }
        Commands::Expand {
            from,
            to,
            input,
            output,
        } => {
            let (window_start, _) = day_window(parse_date(&from)?);
            let (_, window_end) = day_window(parse_date(&to)?);
            let snapshot = read_snapshot(input.as_deref())?;

            let materialized =
                materialize_blocked_intervals(&snapshot.blocked_times, window_start, window_end)
                    .context("Failed to expand recurring blocks")?;
            write_output(output.as_deref(), &serde_json::to_string_pretty(&materialized)?)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path)),
        None => {
            debug!("No config file given, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

/// Current wall-clock time in the configured business timezone.
fn business_now(config: &EngineConfig) -> Result<NaiveDateTime> {
    let tz = config.tz()?;
    Ok(Utc::now().with_timezone(&tz).naive_local())
}

fn read_snapshot(path: Option<&str>) -> Result<ScheduleSnapshot> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("Failed to parse schedule JSON")
}

fn load_store(business: &BusinessId, path: Option<&str>) -> Result<InMemoryStore> {
    let snapshot = read_snapshot(path)?;
    debug!(
        blocked = snapshot.blocked_times.len(),
        appointments = snapshot.appointments.len(),
        "loaded schedule"
    );
    let mut store = InMemoryStore::new();
    store.insert_snapshot(business.clone(), snapshot);
    Ok(store)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
