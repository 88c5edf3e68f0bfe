//! Periodic reminder tick
//!
//! Drives [`ReminderEngine::tick`] on a fixed period and hands every
//! `DoseDue` event to a [`DoseNotifier`]. The ticker owns its task; stopping
//! it (or dropping it) cancels the task, so no tick runs after teardown.

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::{CoreEvent, DoseNotifier, ReminderEngine};

/// Engine shared between the ticker and user-facing callers
pub type SharedEngine = Arc<Mutex<ReminderEngine>>;

/// Handle to a running reminder tick task
pub struct ReminderTicker {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderTicker {
    /// Start ticking `engine` every `period`, reading the time from `clock`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<C>(
        engine: SharedEngine,
        notifier: Arc<dyn DoseNotifier>,
        period: Duration,
        clock: C,
    ) -> Self
    where
        C: Fn() -> DateTime<Local> + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            info!(period_ms = period.as_millis() as u64, "Reminder ticker started");

            loop {
                tokio::select! {
                    biased;

                    _ = &mut shutdown_rx => break,

                    _ = timer.tick() => {
                        let now = clock();
                        let events = {
                            let mut engine = engine.lock().await;
                            engine.tick(now)
                        };

                        for event in events {
                            match event {
                                CoreEvent::DoseDue(alert) => notifier.notify(&alert),
                                other => debug!(event = ?other, "Reminder tick event"),
                            }
                        }
                    }
                }
            }

            info!("Reminder ticker stopped");
        });

        Self {
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop ticking and wait for the task to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            // Receiver gone means the task already exited
            let _ = tx.send(());
        }

        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
            && !e.is_cancelled()
        {
            warn!(error = %e, "Reminder ticker task failed");
        }
    }
}

impl Drop for ReminderTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dosewatch_api::{Medication, MedicationKind, Schedule};
    use dosewatch_config::ReminderSettings;
    use dosewatch_store::{MemoryStore, Store};
    use dosewatch_util::{MedicationId, ScheduleId};
    use std::sync::Mutex as StdMutex;

    fn make_engine() -> SharedEngine {
        let store = Arc::new(MemoryStore::new());
        let mut schedule = Schedule::new(MedicationId::new("m1"));
        schedule.id = ScheduleId::new("s1");
        schedule.time = "08:00".into();
        store
            .save_medication(Medication {
                id: MedicationId::new("m1"),
                name: "Dipirona".into(),
                kind: MedicationKind::Syrup,
                schedule: Some(schedule),
            })
            .unwrap();

        Arc::new(Mutex::new(ReminderEngine::new(store, ReminderSettings::default())))
    }

    fn fixed_clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 12, 30, 8, 0, 5).unwrap()
    }

    fn recording_notifier() -> (Arc<dyn DoseNotifier>, Arc<StdMutex<Vec<(ScheduleId, String)>>>) {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = seen.clone();
        let notifier = move |id: &ScheduleId, name: &str| {
            sink.lock().unwrap().push((id.clone(), name.to_string()));
        };
        let notifier: Arc<dyn DoseNotifier> = Arc::new(notifier);
        (notifier, seen)
    }

    #[tokio::test]
    async fn test_ticker_notifies_once_per_window() {
        let engine = make_engine();
        let (notifier, seen) = recording_notifier();

        let ticker = ReminderTicker::spawn(
            engine.clone(),
            notifier,
            Duration::from_millis(5),
            fixed_clock,
        );
        assert!(ticker.is_running());

        tokio::time::sleep(Duration::from_millis(60)).await;
        ticker.shutdown().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.as_str(), "s1");
        assert_eq!(seen[0].1, "Dipirona");
    }

    #[tokio::test]
    async fn test_shutdown_releases_engine() {
        let engine = make_engine();
        let (notifier, seen) = recording_notifier();

        let ticker = ReminderTicker::spawn(
            engine.clone(),
            notifier,
            Duration::from_millis(5),
            || Local.with_ymd_and_hms(2025, 12, 30, 7, 0, 0).unwrap(),
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
        ticker.shutdown().await;

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(Arc::strong_count(&engine), 1);

        let engine = engine.lock().await;
        assert_eq!(engine.today_schedules().len(), 1);
        assert_eq!(engine.alert_state(&ScheduleId::new("s1")), crate::AlertState::Idle);
    }

    #[tokio::test]
    async fn test_drop_cancels_task() {
        let engine = make_engine();
        let (notifier, seen) = recording_notifier();

        let ticker = ReminderTicker::spawn(
            engine.clone(),
            notifier,
            Duration::from_secs(3600),
            fixed_clock,
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(ticker);

        // The first interval tick is immediate
        assert_eq!(seen.lock().unwrap().len(), 1);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(Arc::strong_count(&engine), 1);
    }
}
