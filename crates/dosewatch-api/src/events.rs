//! Presentation-facing views and alert payloads

use chrono::NaiveDateTime;
use dosewatch_util::{MedicationId, ScheduleId};
use serde::{Deserialize, Serialize};

use crate::{MedicationKind, Schedule};

/// One-shot reminder raised when a dose time is reached and still unchecked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseAlert {
    pub schedule_id: ScheduleId,
    pub medication_id: MedicationId,
    /// Resolved name, or [`crate::UNKNOWN_MEDICATION_LABEL`] for orphans
    pub medication_name: String,
    /// Local date and time the dose was scheduled for
    pub scheduled_for: NaiveDateTime,
}

/// A row of the "today" list: schedule plus display details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayEntry {
    pub schedule: Schedule,
    pub medication_name: String,
    pub medication_kind: Option<MedicationKind>,
    /// Due, unchecked and its time has passed
    pub overdue: bool,
}
