//! Domain types shared across dosewatch crates
//!
//! This crate defines:
//! - Medications and their schedules (the seed/store record shapes)
//! - Presentation views for the "today" list
//! - Alert payloads raised by the reminder engine

mod events;
mod types;

pub use events::*;
pub use types::*;
