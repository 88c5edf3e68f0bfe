//! Configuration validation

use crate::schema::RawConfig;
use crate::settings::{RolloverPolicy, ScheduleOrder};
use thiserror::Error;

/// Longest tick period that still observes every minute of the day
pub const MAX_TICK_INTERVAL_SECS: u64 = 59;

/// Shortest suppression window that outlasts the matching minute
pub const MIN_SUPPRESSION_SECS: u64 = 60;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("tick_interval_seconds must be between 1 and {max}, got {value}")]
    InvalidTickInterval { value: u64, max: u64 },

    #[error("suppression_seconds must be at least {min}, got {value}")]
    SuppressionTooShort { value: u64, min: u64 },

    #[error("Invalid rollover policy '{0}': expected \"reset_checked\" or \"keep\"")]
    InvalidRollover(String),

    #[error("Invalid schedule order '{0}': expected \"insertion\" or \"time\"")]
    InvalidOrder(String),

    #[error("Seed directory is not a directory: {0}")]
    SeedDirNotDirectory(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let reminders = &config.reminders;

    if let Some(tick) = reminders.tick_interval_seconds
        && !(1..=MAX_TICK_INTERVAL_SECS).contains(&tick)
    {
        errors.push(ValidationError::InvalidTickInterval {
            value: tick,
            max: MAX_TICK_INTERVAL_SECS,
        });
    }

    if let Some(window) = reminders.suppression_seconds
        && window < MIN_SUPPRESSION_SECS
    {
        errors.push(ValidationError::SuppressionTooShort {
            value: window,
            min: MIN_SUPPRESSION_SECS,
        });
    }

    if let Some(rollover) = &reminders.rollover
        && parse_rollover(rollover).is_err()
    {
        errors.push(ValidationError::InvalidRollover(rollover.clone()));
    }

    if let Some(order) = &reminders.order
        && parse_order(order).is_err()
    {
        errors.push(ValidationError::InvalidOrder(order.clone()));
    }

    if let Some(seed_dir) = &config.service.seed_dir
        && seed_dir.exists()
        && !seed_dir.is_dir()
    {
        errors.push(ValidationError::SeedDirNotDirectory(
            seed_dir.display().to_string(),
        ));
    }

    errors
}

/// Parse a rollover policy name
pub fn parse_rollover(s: &str) -> Result<RolloverPolicy, String> {
    match s.to_lowercase().as_str() {
        "reset_checked" | "reset" => Ok(RolloverPolicy::ResetChecked),
        "keep" => Ok(RolloverPolicy::Keep),
        other => Err(format!("Unknown rollover policy: {}", other)),
    }
}

/// Parse a schedule order name
pub fn parse_order(s: &str) -> Result<ScheduleOrder, String> {
    match s.to_lowercase().as_str() {
        "insertion" => Ok(ScheduleOrder::Insertion),
        "time" | "chronological" => Ok(ScheduleOrder::Time),
        other => Err(format!("Unknown schedule order: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RawReminderConfig, RawServiceConfig};

    fn config_with(reminders: RawReminderConfig) -> RawConfig {
        RawConfig {
            config_version: 1,
            service: RawServiceConfig::default(),
            reminders,
        }
    }

    #[test]
    fn test_parse_rollover() {
        assert_eq!(parse_rollover("reset_checked").unwrap(), RolloverPolicy::ResetChecked);
        assert_eq!(parse_rollover("KEEP").unwrap(), RolloverPolicy::Keep);
        assert!(parse_rollover("weekly").is_err());
    }

    #[test]
    fn test_parse_order() {
        assert_eq!(parse_order("insertion").unwrap(), ScheduleOrder::Insertion);
        assert_eq!(parse_order("time").unwrap(), ScheduleOrder::Time);
        assert!(parse_order("alphabetical").is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&config_with(RawReminderConfig::default())).is_empty());
    }

    #[test]
    fn test_tick_interval_bounds() {
        let errors = validate_config(&config_with(RawReminderConfig {
            tick_interval_seconds: Some(0),
            ..Default::default()
        }));
        assert!(matches!(errors[0], ValidationError::InvalidTickInterval { value: 0, .. }));

        let errors = validate_config(&config_with(RawReminderConfig {
            tick_interval_seconds: Some(60),
            ..Default::default()
        }));
        assert_eq!(errors.len(), 1);

        let errors = validate_config(&config_with(RawReminderConfig {
            tick_interval_seconds: Some(59),
            ..Default::default()
        }));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_suppression_must_outlast_a_minute() {
        let errors = validate_config(&config_with(RawReminderConfig {
            suppression_seconds: Some(30),
            ..Default::default()
        }));
        assert!(matches!(
            errors[0],
            ValidationError::SuppressionTooShort { value: 30, min: 60 }
        ));
    }

    #[test]
    fn test_collects_every_error() {
        let errors = validate_config(&config_with(RawReminderConfig {
            tick_interval_seconds: Some(120),
            suppression_seconds: Some(1),
            rollover: Some("never".into()),
            order: Some("random".into()),
        }));
        assert_eq!(errors.len(), 4);
    }
}
