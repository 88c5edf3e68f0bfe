//! Validated configuration structures

use crate::schema::{RawConfig, RawReminderConfig, RawServiceConfig};
use crate::validation::{parse_order, parse_rollover};
use dosewatch_util::default_data_dir;
use std::path::PathBuf;
use std::time::Duration;

/// Default reminder tick period
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(10);

/// Default alert suppression window after a dose time
pub const DEFAULT_SUPPRESSION_WINDOW: Duration = Duration::from_secs(120);

/// Validated configuration ready for use by the service
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub service: ServiceConfig,
    pub reminders: ReminderSettings,
}

impl Config {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            service: ServiceConfig::from_raw(raw.service),
            reminders: ReminderSettings::from_raw(raw.reminders),
        }
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub seed_dir: PathBuf,
}

impl ServiceConfig {
    fn from_raw(raw: RawServiceConfig) -> Self {
        Self {
            seed_dir: raw.seed_dir.unwrap_or_else(default_data_dir),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            seed_dir: default_data_dir(),
        }
    }
}

/// What the first tick of a new local day does to `checked` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RolloverPolicy {
    /// Clear every `checked` flag, reload today's set and forget alert state
    #[default]
    ResetChecked,
    /// Leave flags alone; only reload today's set
    Keep,
}

/// Presentation order of the today list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleOrder {
    /// Store insertion order
    #[default]
    Insertion,
    /// Ascending dose time, malformed times last
    Time,
}

/// Reminder engine and ticker settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSettings {
    pub tick_interval: Duration,
    pub suppression_window: Duration,
    pub rollover: RolloverPolicy,
    pub order: ScheduleOrder,
}

impl ReminderSettings {
    fn from_raw(raw: RawReminderConfig) -> Self {
        Self {
            tick_interval: raw
                .tick_interval_seconds
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TICK_INTERVAL),
            suppression_window: raw
                .suppression_seconds
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_SUPPRESSION_WINDOW),
            rollover: raw
                .rollover
                .as_deref()
                .and_then(|s| parse_rollover(s).ok())
                .unwrap_or_default(),
            order: raw
                .order
                .as_deref()
                .and_then(|s| parse_order(s).ok())
                .unwrap_or_default(),
        }
    }
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            suppression_window: DEFAULT_SUPPRESSION_WINDOW,
            rollover: RolloverPolicy::default(),
            order: ScheduleOrder::default(),
        }
    }
}
