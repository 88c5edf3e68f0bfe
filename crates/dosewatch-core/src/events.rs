//! Core events emitted by the engine

use chrono::NaiveDate;
use dosewatch_api::DoseAlert;
use dosewatch_util::ScheduleId;

/// Events emitted by the reminder engine tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    /// A dose time was reached while unchecked; raise one alert
    DoseDue(DoseAlert),

    /// Suppression window elapsed; the schedule may alert again
    AlertRearmed { schedule_id: ScheduleId },

    /// First tick on a new local date
    DayRolledOver {
        day: NaiveDate,
        /// Number of `checked` flags cleared by the rollover policy
        cleared: usize,
    },
}
