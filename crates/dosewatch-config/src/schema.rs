//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Service-level settings
    #[serde(default)]
    pub service: RawServiceConfig,

    /// Reminder tick and alert behaviour
    #[serde(default)]
    pub reminders: RawReminderConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// Directory holding `medications.json` / `schedules.json` seed files
    pub seed_dir: Option<PathBuf>,
}

/// Reminder settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawReminderConfig {
    /// How often the reminder tick runs (default 10)
    pub tick_interval_seconds: Option<u64>,

    /// How long an alert stays suppressed after its dose time (default 120)
    pub suppression_seconds: Option<u64>,

    /// What happens to `checked` flags on a new day: "reset_checked" or "keep"
    pub rollover: Option<String>,

    /// Today-list ordering: "insertion" or "time"
    pub order: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            config_version = 1

            [service]
            seed_dir = "/var/lib/dosewatch/seed"

            [reminders]
            tick_interval_seconds = 5
            suppression_seconds = 180
            rollover = "keep"
            order = "time"
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.service.seed_dir,
            Some(PathBuf::from("/var/lib/dosewatch/seed"))
        );
        assert_eq!(config.reminders.tick_interval_seconds, Some(5));
        assert_eq!(config.reminders.rollover.as_deref(), Some("keep"));
    }

    #[test]
    fn sections_are_optional() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.service.seed_dir.is_none());
        assert!(config.reminders.tick_interval_seconds.is_none());
    }
}
