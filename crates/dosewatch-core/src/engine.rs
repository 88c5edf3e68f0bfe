//! Reminder engine

use chrono::{DateTime, Local, NaiveDate};
use dosewatch_api::{DoseAlert, Medication, Schedule, TodayEntry, UNKNOWN_MEDICATION_LABEL};
use dosewatch_config::{ReminderSettings, RolloverPolicy, ScheduleOrder};
use dosewatch_store::{Store, StoreResult};
use dosewatch_util::{MedicationId, ScheduleId};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{get_today_schedules, is_past, AlertState, AlertTracker, CoreEvent};

/// The reminder engine
///
/// Holds the "today" schedule set loaded by [`refresh`](Self::refresh) and the
/// per-schedule alert state. All mutation goes through `&mut self`, so one
/// lock around the engine serializes ticks and user actions.
pub struct ReminderEngine {
    store: Arc<dyn Store>,
    settings: ReminderSettings,
    alerts: AlertTracker,
    today: Vec<Schedule>,
    loaded_for: Option<NaiveDate>,
    /// Local date whose rollover has been applied
    current_day: Option<NaiveDate>,
}

impl ReminderEngine {
    /// Create a new reminder engine
    pub fn new(store: Arc<dyn Store>, settings: ReminderSettings) -> Self {
        info!(
            tick_interval_secs = settings.tick_interval.as_secs(),
            suppression_secs = settings.suppression_window.as_secs(),
            rollover = ?settings.rollover,
            order = ?settings.order,
            "Reminder engine initialized"
        );

        Self {
            alerts: AlertTracker::new(settings.suppression_window),
            store,
            settings,
            today: Vec::new(),
            loaded_for: None,
            current_day: None,
        }
    }

    pub fn settings(&self) -> &ReminderSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Query the store for the schedules due on `now`'s date, in the
    /// configured presentation order.
    pub fn get_today_schedules(&self, now: DateTime<Local>) -> StoreResult<Vec<Schedule>> {
        let all = self.store.get_all_schedules()?;
        let mut today = get_today_schedules(&all, now.date_naive());

        if self.settings.order == ScheduleOrder::Time {
            // Stable: equal times keep insertion order
            today.sort_by_key(|s| s.wall_clock().map(|c| c.minute_of_day()).unwrap_or(u32::MAX));
        }

        Ok(today)
    }

    /// Reload the cached today set. Returns the number of schedules due.
    pub fn refresh(&mut self, now: DateTime<Local>) -> StoreResult<usize> {
        self.today = self.get_today_schedules(now)?;
        self.loaded_for = Some(now.date_naive());
        self.current_day.get_or_insert(now.date_naive());

        debug!(
            day = %now.date_naive(),
            due = self.today.len(),
            "Today schedules loaded"
        );

        Ok(self.today.len())
    }

    /// The cached today set, as of the last refresh
    pub fn today_schedules(&self) -> &[Schedule] {
        &self.today
    }

    /// Whether a due dose is overdue at `now`
    pub fn is_past(&self, schedule: &Schedule, now: DateTime<Local>) -> bool {
        is_past(schedule, now.naive_local())
    }

    /// Cached today schedules that are overdue at `now`
    pub fn overdue(&self, now: DateTime<Local>) -> Vec<&Schedule> {
        self.today.iter().filter(|s| self.is_past(s, now)).collect()
    }

    /// The cached today set with display names and overdue flags
    pub fn today_view(&self, now: DateTime<Local>) -> Vec<TodayEntry> {
        self.today
            .iter()
            .map(|schedule| {
                let medication = self.lookup_medication(&schedule.medication_id);
                TodayEntry {
                    overdue: self.is_past(schedule, now),
                    medication_name: medication
                        .as_ref()
                        .map(|m| m.name.clone())
                        .unwrap_or_else(|| UNKNOWN_MEDICATION_LABEL.to_string()),
                    medication_kind: medication.map(|m| m.kind),
                    schedule: schedule.clone(),
                }
            })
            .collect()
    }

    /// Current alert state of a schedule
    pub fn alert_state(&self, id: &ScheduleId) -> AlertState {
        self.alerts.state(id)
    }

    /// Flip a schedule's `checked` flag in the store and the cached set.
    ///
    /// Alert state is left alone; only elapsed time re-arms an alert.
    pub fn toggle_checked(&mut self, id: &ScheduleId) -> StoreResult<bool> {
        let checked = self.store.toggle_checked(id)?;

        if let Some(cached) = self.today.iter_mut().find(|s| &s.id == id) {
            cached.checked = checked;
        }

        info!(schedule_id = %id, checked, "Dose check toggled");
        Ok(checked)
    }

    /// Save a schedule and reload the today set
    pub fn save_schedule(&mut self, schedule: Schedule, now: DateTime<Local>) -> StoreResult<()> {
        self.store.save_schedule(schedule)?;
        self.refresh(now)?;
        Ok(())
    }

    /// Save a medication (and its schedule) and reload the today set
    pub fn save_medication(&mut self, medication: Medication, now: DateTime<Local>) -> StoreResult<()> {
        self.store.save_medication(medication)?;
        self.refresh(now)?;
        Ok(())
    }

    /// Delete a medication with its schedules and drop their alert state
    pub fn delete_medication(&mut self, id: &MedicationId, now: DateTime<Local>) -> StoreResult<()> {
        let removed = self.store.get_schedules_by_medication(id)?;
        self.store.delete_medication(id)?;

        for schedule in &removed {
            self.alerts.forget(&schedule.id);
        }

        info!(medication_id = %id, schedules_removed = removed.len(), "Medication deleted");
        self.refresh(now)?;
        Ok(())
    }

    /// Tick the engine: roll the day over if needed, re-arm elapsed alerts,
    /// then raise alerts for doses whose minute has arrived.
    pub fn tick(&mut self, now: DateTime<Local>) -> Vec<CoreEvent> {
        let mut events = Vec::new();
        let today = now.date_naive();
        let now_local = now.naive_local();

        // Rollover runs once per date even if the reload below keeps failing
        if self.current_day != Some(today) {
            if self.current_day.is_some() {
                events.push(self.roll_over(today));
            }
            self.current_day = Some(today);
        }

        if self.loaded_for != Some(today)
            && let Err(e) = self.refresh(now)
        {
            warn!(error = %e, "Failed to load today schedules, keeping previous set");
        }

        for schedule_id in self.alerts.rearm_elapsed(now_local) {
            debug!(schedule_id = %schedule_id, "Alert re-armed");
            events.push(CoreEvent::AlertRearmed { schedule_id });
        }

        let mut due = Vec::new();
        for schedule in &self.today {
            if schedule.wall_clock().is_none() {
                continue;
            }
            if let Some(scheduled_for) = self.alerts.evaluate(schedule, now_local) {
                due.push((schedule.id.clone(), schedule.medication_id.clone(), scheduled_for));
            }
        }

        for (schedule_id, medication_id, scheduled_for) in due {
            let medication_name = self
                .lookup_medication(&medication_id)
                .map(|m| m.name)
                .unwrap_or_else(|| UNKNOWN_MEDICATION_LABEL.to_string());

            info!(
                schedule_id = %schedule_id,
                medication = %medication_name,
                scheduled_for = %scheduled_for,
                "Dose due"
            );

            events.push(CoreEvent::DoseDue(DoseAlert {
                schedule_id,
                medication_id,
                medication_name,
                scheduled_for,
            }));
        }

        events
    }

    fn roll_over(&mut self, day: NaiveDate) -> CoreEvent {
        let cleared = match self.settings.rollover {
            RolloverPolicy::ResetChecked => {
                self.alerts.reset();
                self.store.clear_all_checked().unwrap_or_else(|e| {
                    warn!(error = %e, "Failed to clear checked flags on rollover");
                    0
                })
            }
            RolloverPolicy::Keep => 0,
        };

        info!(day = %day, cleared, policy = ?self.settings.rollover, "Day rolled over");
        CoreEvent::DayRolledOver { day, cleared }
    }

    fn lookup_medication(&self, id: &MedicationId) -> Option<Medication> {
        match self.store.get_medication_by_id(id) {
            Ok(Some(medication)) => Some(medication),
            Ok(None) => {
                warn!(medication_id = %id, "Schedule references unknown medication");
                None
            }
            Err(e) => {
                warn!(medication_id = %id, error = %e, "Medication lookup failed");
                None
            }
        }
    }
}
