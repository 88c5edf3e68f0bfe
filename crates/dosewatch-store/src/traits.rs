//! Store trait definitions

use dosewatch_api::{Medication, Schedule};
use dosewatch_util::{MedicationId, ScheduleId};

use crate::StoreResult;

/// Main store trait
///
/// Schedules are returned in insertion order; the recurrence resolver relies
/// on that order being stable.
pub trait Store: Send + Sync {
    // Medications

    /// Get every medication, each with its schedule attached
    fn get_all_medications(&self) -> StoreResult<Vec<Medication>>;

    /// Get a medication by ID, with its schedule attached
    fn get_medication_by_id(&self, id: &MedicationId) -> StoreResult<Option<Medication>>;

    /// Insert or replace a medication; an embedded schedule is upserted too
    fn save_medication(&self, medication: Medication) -> StoreResult<()>;

    /// Delete a medication and every schedule referencing it
    fn delete_medication(&self, id: &MedicationId) -> StoreResult<()>;

    // Schedules

    /// Get all schedules in insertion order
    fn get_all_schedules(&self) -> StoreResult<Vec<Schedule>>;

    /// Get a schedule by ID
    fn get_schedule_by_id(&self, id: &ScheduleId) -> StoreResult<Option<Schedule>>;

    /// Get schedules referencing a medication
    fn get_schedules_by_medication(&self, id: &MedicationId) -> StoreResult<Vec<Schedule>>;

    /// Insert or replace a schedule by ID
    fn save_schedule(&self, schedule: Schedule) -> StoreResult<()>;

    /// Flip a schedule's `checked` flag, returning the new value
    fn toggle_checked(&self, id: &ScheduleId) -> StoreResult<bool>;

    /// Get all schedules not yet checked
    fn get_pending_schedules(&self) -> StoreResult<Vec<Schedule>>;

    /// Uncheck every schedule, returning how many were checked
    fn clear_all_checked(&self) -> StoreResult<usize>;

    // Health

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}
