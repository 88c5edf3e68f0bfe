//! Configuration parsing and validation for dosewatch
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Seed data location
//! - Reminder tick period, alert suppression window, day-rollover policy
//! - Validation with clear error messages

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Config::from_raw(raw))
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn parse_minimal_config() {
        let config = parse_config("config_version = 1").unwrap();
        assert_eq!(config.reminders, ReminderSettings::default());
        assert_eq!(config.reminders.tick_interval, Duration::from_secs(10));
        assert_eq!(config.reminders.suppression_window, Duration::from_secs(120));
        assert_eq!(config.reminders.rollover, RolloverPolicy::ResetChecked);
        assert_eq!(config.reminders.order, ScheduleOrder::Insertion);
    }

    #[test]
    fn parse_reminder_overrides() {
        let config = parse_config(
            r#"
            config_version = 1

            [reminders]
            tick_interval_seconds = 5
            suppression_seconds = 300
            rollover = "keep"
            order = "time"
        "#,
        )
        .unwrap();

        assert_eq!(config.reminders.tick_interval, Duration::from_secs(5));
        assert_eq!(config.reminders.suppression_window, Duration::from_secs(300));
        assert_eq!(config.reminders.rollover, RolloverPolicy::Keep);
        assert_eq!(config.reminders.order, ScheduleOrder::Time);
    }

    #[test]
    fn reject_wrong_version() {
        let result = parse_config("config_version = 99");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_values() {
        let result = parse_config(
            r#"
            config_version = 1

            [reminders]
            tick_interval_seconds = 90
        "#,
        );
        assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "config_version = 1").unwrap();
        writeln!(file, "[service]").unwrap();
        writeln!(file, "seed_dir = \"/tmp/dosewatch-seed\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.service.seed_dir,
            std::path::PathBuf::from("/tmp/dosewatch-seed")
        );
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = load_config("/nonexistent/dosewatch/config.toml");
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
