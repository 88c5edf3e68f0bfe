//! In-memory store implementation

use dosewatch_api::{validate_medication_name, Medication, Schedule};
use dosewatch_util::{DosewatchError, MedicationId, ScheduleId};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::{Seed, Store, StoreError, StoreResult};

/// In-memory store
///
/// Medications are held without their schedule; schedules live in their own
/// collection and are re-attached on read, so there is one copy of each.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
}

#[derive(Debug, Default)]
struct StoreData {
    medications: Vec<Medication>,
    schedules: Vec<Schedule>,
}

impl StoreData {
    fn upsert_schedule(&mut self, schedule: Schedule) {
        match self.schedules.iter_mut().find(|s| s.id == schedule.id) {
            Some(existing) => *existing = schedule,
            None => self.schedules.push(schedule),
        }
    }

    fn with_schedule(&self, mut medication: Medication) -> Medication {
        medication.schedule = self
            .schedules
            .iter()
            .find(|s| s.medication_id == medication.id)
            .cloned();
        medication
    }
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from seed data.
    ///
    /// Entries of `schedules.json` come first, in file order; schedules
    /// embedded in medications are appended unless their ID is already known.
    pub fn from_seed(seed: Seed) -> Self {
        let mut data = StoreData {
            medications: Vec::with_capacity(seed.medications.len()),
            schedules: seed.schedules,
        };

        for mut medication in seed.medications {
            if let Some(schedule) = medication.schedule.take()
                && !data.schedules.iter().any(|s| s.id == schedule.id)
            {
                data.schedules.push(schedule);
            }
            data.medications.push(medication);
        }

        for schedule in &data.schedules {
            if !data.medications.iter().any(|m| m.id == schedule.medication_id) {
                warn!(
                    schedule_id = %schedule.id,
                    medication_id = %schedule.medication_id,
                    "Seeded schedule references unknown medication"
                );
            }
        }

        debug!(
            medications = data.medications.len(),
            schedules = data.schedules.len(),
            "Memory store seeded"
        );

        Self {
            data: Mutex::new(data),
        }
    }

    fn data(&self) -> StoreResult<MutexGuard<'_, StoreData>> {
        self.data.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl Store for MemoryStore {
    fn get_all_medications(&self) -> StoreResult<Vec<Medication>> {
        let data = self.data()?;
        Ok(data
            .medications
            .iter()
            .map(|m| data.with_schedule(m.clone()))
            .collect())
    }

    fn get_medication_by_id(&self, id: &MedicationId) -> StoreResult<Option<Medication>> {
        let data = self.data()?;
        Ok(data
            .medications
            .iter()
            .find(|m| &m.id == id)
            .map(|m| data.with_schedule(m.clone())))
    }

    fn save_medication(&self, mut medication: Medication) -> StoreResult<()> {
        medication.name = validate_medication_name(&medication.name)?;

        let mut data = self.data()?;

        if let Some(mut schedule) = medication.schedule.take() {
            schedule.medication_id = medication.id.clone();
            data.upsert_schedule(schedule);
        }

        let id = medication.id.clone();
        match data.medications.iter_mut().find(|m| m.id == medication.id) {
            Some(existing) => *existing = medication,
            None => data.medications.push(medication),
        }

        debug!(medication_id = %id, "Medication saved");
        Ok(())
    }

    fn delete_medication(&self, id: &MedicationId) -> StoreResult<()> {
        let mut data = self.data()?;

        data.medications.retain(|m| &m.id != id);
        let before = data.schedules.len();
        data.schedules.retain(|s| &s.medication_id != id);

        debug!(
            medication_id = %id,
            schedules_removed = before - data.schedules.len(),
            "Medication deleted"
        );
        Ok(())
    }

    fn get_all_schedules(&self) -> StoreResult<Vec<Schedule>> {
        Ok(self.data()?.schedules.clone())
    }

    fn get_schedule_by_id(&self, id: &ScheduleId) -> StoreResult<Option<Schedule>> {
        Ok(self.data()?.schedules.iter().find(|s| &s.id == id).cloned())
    }

    fn get_schedules_by_medication(&self, id: &MedicationId) -> StoreResult<Vec<Schedule>> {
        Ok(self
            .data()?
            .schedules
            .iter()
            .filter(|s| &s.medication_id == id)
            .cloned()
            .collect())
    }

    fn save_schedule(&self, schedule: Schedule) -> StoreResult<()> {
        let id = schedule.id.clone();
        self.data()?.upsert_schedule(schedule);

        debug!(schedule_id = %id, "Schedule saved");
        Ok(())
    }

    fn toggle_checked(&self, id: &ScheduleId) -> StoreResult<bool> {
        let mut data = self.data()?;
        let schedule = data
            .schedules
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| DosewatchError::ScheduleNotFound(id.clone()))?;

        schedule.checked = !schedule.checked;

        debug!(schedule_id = %id, checked = schedule.checked, "Schedule toggled");
        Ok(schedule.checked)
    }

    fn get_pending_schedules(&self) -> StoreResult<Vec<Schedule>> {
        Ok(self
            .data()?
            .schedules
            .iter()
            .filter(|s| !s.checked)
            .cloned()
            .collect())
    }

    fn clear_all_checked(&self) -> StoreResult<usize> {
        let mut data = self.data()?;
        let mut cleared = 0;

        for schedule in data.schedules.iter_mut().filter(|s| s.checked) {
            schedule.checked = false;
            cleared += 1;
        }

        debug!(cleared, "Checked flags cleared");
        Ok(cleared)
    }

    fn is_healthy(&self) -> bool {
        self.data.lock().is_ok()
    }
}
