//! Shared utilities for dosewatch
//!
//! This crate provides:
//! - ID types (MedicationId, ScheduleId)
//! - Wall-clock time helpers (dose times, calendar arithmetic, mock time)
//! - Error types
//! - Default paths for config and data directories

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
