//! Reminder core for dosewatch
//!
//! This crate contains:
//! - Recurrence resolution (which schedules are due on a date)
//! - Due/overdue classification
//! - Per-schedule alert suppression (Idle -> Notified -> Idle)
//! - The reminder engine and its periodic ticker

mod alert;
mod engine;
mod events;
mod notifier;
mod overdue;
mod recurrence;
mod ticker;

pub use alert::*;
pub use engine::*;
pub use events::*;
pub use notifier::*;
pub use overdue::*;
pub use recurrence::*;
pub use ticker::*;
