//! Time utilities for dosewatch
//!
//! Everything here is local wall-clock time: dose times are "HH:MM" in the
//! user's local zone and recurrence works on local calendar dates.
//!
//! Debug builds can shift the clock with `DOSEWATCH_MOCK_TIME`, e.g.
//! `DOSEWATCH_MOCK_TIME="2025-12-25 07:59:30" dosewatchd` starts the service
//! half a minute before an 08:00 dose. The shifted clock keeps running.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use tracing::{info, warn};

/// Environment variable holding the mock start time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "DOSEWATCH_MOCK_TIME";

const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shift applied to the system clock; decided once per process
static CLOCK_SHIFT: OnceLock<Option<chrono::Duration>> = OnceLock::new();

fn clock_shift() -> Option<chrono::Duration> {
    *CLOCK_SHIFT.get_or_init(|| {
        if !cfg!(debug_assertions) {
            return None;
        }

        let raw = std::env::var(MOCK_TIME_ENV_VAR).ok()?;
        match parse_mock_time(&raw) {
            Some(mock) => {
                let shift = mock.signed_duration_since(Local::now());
                info!(mock_time = %raw, shift_secs = shift.num_seconds(), "Mock time enabled");
                Some(shift)
            }
            None => {
                warn!(mock_time = %raw, expected = MOCK_TIME_FORMAT, "Ignoring unparsable mock time");
                None
            }
        }
    })
}

fn parse_mock_time(raw: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), MOCK_TIME_FORMAT).ok()?;
    Local.from_local_datetime(&naive).earliest()
}

pub fn is_mock_time_active() -> bool {
    clock_shift().is_some()
}

/// Current local time, shifted when mock time is active
pub fn now() -> DateTime<Local> {
    Local::now() + clock_shift().unwrap_or_else(chrono::Duration::zero)
}

/// Format a DateTime as a dose-list clock ("HH:MM").
pub fn format_clock_time(dt: &DateTime<Local>) -> String {
    dt.format("%H:%M").to_string()
}

/// Format a DateTime for display with full date and time.
pub fn format_datetime_full(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// A time of day with minute resolution, as configured for a dose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallClock {
    pub hour: u8,
    pub minute: u8,
}

impl WallClock {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Parse a 24-hour `HH:MM` string.
    ///
    /// Returns `None` for anything that is not two numeric components in
    /// range. Callers treat `None` as "never due".
    pub fn parse(s: &str) -> Option<Self> {
        let (hour, minute) = s.trim().split_once(':')?;
        let hour: u8 = hour.parse().ok()?;
        let minute: u8 = minute.parse().ok()?;
        Self::new(hour, minute)
    }

    /// Truncates seconds and below.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, 0).unwrap_or(NaiveTime::MIN)
    }

    /// This time of day on the given date, seconds zeroed
    pub fn on_date(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.to_naive_time())
    }

    /// Returns minutes since midnight
    pub fn minute_of_day(&self) -> u32 {
        (self.hour as u32) * 60 + (self.minute as u32)
    }
}

impl PartialOrd for WallClock {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WallClock {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.minute_of_day().cmp(&other.minute_of_day())
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Weekday index with Sunday = 0 through Saturday = 6
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// Last valid day number (28..=31) of the given month
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 { (year + 1, 1) } else { (year, month + 1) };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}
