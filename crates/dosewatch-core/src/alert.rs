//! Per-schedule alert suppression
//!
//! # State Machine
//!
//! ```text
//!            minute matches, unchecked
//!   Idle ───────────────────────────────► Notified(at)
//!    ▲                                        │
//!    │   now - at > suppression window        │
//!    └────────────────────────────────────────┘
//! ```
//!
//! - **Idle:** not yet alerted for this dose time. Absent from the map.
//! - **Notified:** alert raised for the dose at `at`; further matches are
//!   suppressed until the window has elapsed.
//!
//! Checking a schedule does not move it back to `Idle`. Only elapsed time
//! (or a full [`AlertTracker::reset`] on day rollover) re-arms it.

use chrono::NaiveDateTime;
use dosewatch_api::Schedule;
use dosewatch_util::{ScheduleId, WallClock};
use std::collections::HashMap;
use std::time::Duration;

/// Alert state of a single schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    Idle,
    Notified { scheduled_for: NaiveDateTime },
}

/// Alert-suppression state for every schedule, keyed by ID
#[derive(Debug)]
pub struct AlertTracker {
    window: chrono::Duration,
    notified: HashMap<ScheduleId, NaiveDateTime>,
}

impl AlertTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window: chrono::Duration::from_std(window).unwrap_or(chrono::Duration::MAX),
            notified: HashMap::new(),
        }
    }

    pub fn state(&self, id: &ScheduleId) -> AlertState {
        match self.notified.get(id) {
            Some(at) => AlertState::Notified { scheduled_for: *at },
            None => AlertState::Idle,
        }
    }

    /// Move every schedule whose window has elapsed back to `Idle`.
    ///
    /// Returns the re-armed IDs.
    pub fn rearm_elapsed(&mut self, now: NaiveDateTime) -> Vec<ScheduleId> {
        let window = self.window;
        let mut rearmed = Vec::new();

        self.notified.retain(|id, at| {
            let keep = now.signed_duration_since(*at) <= window;
            if !keep {
                rearmed.push(id.clone());
            }
            keep
        });

        rearmed
    }

    /// Evaluate one schedule at `now`.
    ///
    /// Returns the scheduled instant when the schedule moves from `Idle` to
    /// `Notified`, i.e. exactly when an alert must be raised.
    pub fn evaluate(&mut self, schedule: &Schedule, now: NaiveDateTime) -> Option<NaiveDateTime> {
        if schedule.checked || self.notified.contains_key(&schedule.id) {
            return None;
        }

        let clock = schedule.wall_clock()?;
        if WallClock::from_naive_time(now.time()) != clock {
            return None;
        }

        let scheduled_for = clock.on_date(now.date());
        self.notified.insert(schedule.id.clone(), scheduled_for);
        Some(scheduled_for)
    }

    /// Drop state for one schedule (e.g. after it was deleted)
    pub fn forget(&mut self, id: &ScheduleId) {
        self.notified.remove(id);
    }

    /// Return every schedule to `Idle`
    pub fn reset(&mut self) {
        self.notified.clear();
    }

    /// Number of schedules currently suppressed
    pub fn notified_count(&self) -> usize {
        self.notified.len()
    }
}
