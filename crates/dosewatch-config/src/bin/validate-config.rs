//! Config validation CLI tool
//!
//! Validates a dosewatch configuration file and reports any errors.

use dosewatch_config::{RolloverPolicy, ScheduleOrder};
use dosewatch_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a dosewatch configuration file.");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match dosewatch_config::load_config(&config_path) {
        Ok(config) => {
            let reminders = &config.reminders;
            let rollover = match reminders.rollover {
                RolloverPolicy::ResetChecked => "reset checked flags",
                RolloverPolicy::Keep => "keep checked flags",
            };
            let order = match reminders.order {
                ScheduleOrder::Insertion => "insertion",
                ScheduleOrder::Time => "by dose time",
            };

            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", dosewatch_config::CURRENT_CONFIG_VERSION);
            println!("  Seed directory: {}", config.service.seed_dir.display());
            println!("  Tick interval: {}s", reminders.tick_interval.as_secs());
            println!("  Alert suppression: {}s", reminders.suppression_window.as_secs());
            println!("  Day rollover: {}", rollover);
            println!("  Today order: {}", order);

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                dosewatch_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                dosewatch_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                dosewatch_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                dosewatch_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        dosewatch_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
