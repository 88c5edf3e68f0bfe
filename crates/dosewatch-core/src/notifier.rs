//! Alert delivery seam

use dosewatch_api::DoseAlert;
use dosewatch_util::ScheduleId;

/// Receives one call per `Idle -> Notified` transition.
///
/// Any `Fn(&ScheduleId, &str)` closure taking the schedule ID and medication
/// name is a notifier.
pub trait DoseNotifier: Send + Sync {
    fn notify(&self, alert: &DoseAlert);
}

impl<F> DoseNotifier for F
where
    F: Fn(&ScheduleId, &str) + Send + Sync,
{
    fn notify(&self, alert: &DoseAlert) {
        self(&alert.schedule_id, &alert.medication_name)
    }
}
