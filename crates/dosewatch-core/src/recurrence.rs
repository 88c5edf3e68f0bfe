//! Recurrence resolution: is a schedule due on a given calendar date?
//!
//! Every function here is total. Odd stored data (short weekday arrays,
//! out-of-range days of month) resolves to a defined answer instead of an
//! error.

use chrono::{Datelike, NaiveDate};
use dosewatch_api::{Frequency, Schedule};
use dosewatch_util::{last_day_of_month, weekday_index};

/// Whether `schedule` has a dose on `date`.
///
/// - daily: always
/// - weekly: the date's weekday (Sunday = 0) is selected
/// - monthly: the date is the configured day of month, clamped to the
///   month's last day so that "the 31st" still fires once in short months
pub fn is_due_on(schedule: &Schedule, date: NaiveDate) -> bool {
    match schedule.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => schedule.selected_days.is_selected(weekday_index(date)),
        Frequency::Monthly => {
            effective_day_of_month(schedule.day_of_month, date.year(), date.month()) == date.day()
        }
    }
}

/// The day a monthly schedule fires in the given month.
///
/// Absent or non-positive values count as 1; values past the end of the month
/// become the month's last day.
pub fn effective_day_of_month(day_of_month: Option<i32>, year: i32, month: u32) -> u32 {
    let requested = day_of_month.filter(|d| *d >= 1).unwrap_or(1) as u32;
    requested.min(last_day_of_month(year, month))
}

/// Filter schedules down to those due on `today`.
///
/// Output keeps the input order; nothing is sorted.
pub fn get_today_schedules<'a, I>(schedules: I, today: NaiveDate) -> Vec<Schedule>
where
    I: IntoIterator<Item = &'a Schedule>,
{
    schedules
        .into_iter()
        .filter(|s| is_due_on(s, today))
        .cloned()
        .collect()
}
