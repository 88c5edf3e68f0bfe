//! Due/overdue classification for the today list

use chrono::NaiveDateTime;
use dosewatch_api::Schedule;

/// Whether a dose's time has already passed today without being checked.
///
/// `now` is local wall-clock time on the same day as the schedules being
/// evaluated. A checked schedule is never past, and neither is one whose
/// `time` does not parse as `HH:MM`.
pub fn is_past(schedule: &Schedule, now: NaiveDateTime) -> bool {
    if schedule.checked {
        return false;
    }

    match schedule.wall_clock() {
        Some(clock) => now > clock.on_date(now.date()),
        None => false,
    }
}
