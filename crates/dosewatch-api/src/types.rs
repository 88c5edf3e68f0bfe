//! Shared domain types for dosewatch
//!
//! Field names serialize in camelCase so the upstream JSON seed files
//! (`medications.json`, `schedules.json`) load without translation.

use dosewatch_util::{DosewatchError, MedicationId, Result, ScheduleId, WallClock};
use serde::{Deserialize, Serialize};

/// Label shown in place of a medication name when a schedule's
/// `medicationId` does not resolve.
pub const UNKNOWN_MEDICATION_LABEL: &str = "Unknown medication";

/// Minimum length of a trimmed medication name
pub const MIN_MEDICATION_NAME_LEN: usize = 2;

/// Default dose time for a newly registered medication
pub const DEFAULT_DOSE_TIME: &str = "08:00";

/// Medication category. Only used for iconography.
///
/// The upstream seed data uses Portuguese identifiers, accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicationKind {
    #[serde(alias = "injecao")]
    Injection,
    #[serde(alias = "pilula")]
    Pill,
    #[serde(alias = "xarope")]
    Syrup,
    #[serde(alias = "gotejamento")]
    Drip,
    #[default]
    #[serde(alias = "comprimido")]
    Tablet,
    Spray,
}

/// Recurrence frequency of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

/// Weekday selection for weekly schedules, indexed Sunday(0)..Saturday(6)
///
/// Stored as a plain JSON array. Reads past the end yield `false`, so a
/// short array never causes a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedDays(Vec<bool>);

impl SelectedDays {
    pub const LEN: usize = 7;

    pub fn new(days: Vec<bool>) -> Self {
        Self(days)
    }

    pub fn every_day() -> Self {
        Self(vec![true; Self::LEN])
    }

    /// Whether the weekday at `index` (Sunday = 0) is selected
    pub fn is_selected(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Always exactly seven entries, padding missing ones with `false`
    pub fn to_array(&self) -> [bool; 7] {
        std::array::from_fn(|i| self.is_selected(i))
    }
}

impl Default for SelectedDays {
    fn default() -> Self {
        Self(vec![false; Self::LEN])
    }
}

impl From<[bool; 7]> for SelectedDays {
    fn from(days: [bool; 7]) -> Self {
        Self(days.to_vec())
    }
}

/// A recurrence rule plus a time of day for one medication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,

    /// Weak back-reference; the schedule does not own the medication
    pub medication_id: MedicationId,

    /// "HH:MM", 24-hour
    pub time: String,

    #[serde(default)]
    pub frequency: Frequency,

    /// Only meaningful for weekly schedules
    #[serde(default)]
    pub selected_days: SelectedDays,

    /// Only meaningful for monthly schedules. Absent means 1. Never rewritten
    /// on clamp; clamping happens at evaluation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i32>,

    /// Taken today
    #[serde(default)]
    pub checked: bool,
}

impl Schedule {
    /// A fresh schedule with the new-medication defaults: 08:00, daily,
    /// every weekday selected, day 1 of the month, unchecked.
    pub fn new(medication_id: MedicationId) -> Self {
        Self {
            id: ScheduleId::generate(),
            medication_id,
            time: DEFAULT_DOSE_TIME.to_string(),
            frequency: Frequency::Daily,
            selected_days: SelectedDays::every_day(),
            day_of_month: Some(1),
            checked: false,
        }
    }

    /// Parsed dose time, or `None` if `time` is malformed
    pub fn wall_clock(&self) -> Option<WallClock> {
        WallClock::parse(&self.time)
    }
}

/// A registered medication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: MedicationId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: MedicationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}

impl Medication {
    /// Register a new medication with a default schedule.
    ///
    /// The name is trimmed and validated.
    pub fn new(name: &str, kind: MedicationKind) -> Result<Self> {
        let name = validate_medication_name(name)?;
        let id = MedicationId::generate();
        let schedule = Schedule::new(id.clone());

        Ok(Self {
            id,
            name,
            kind,
            schedule: Some(schedule),
        })
    }
}

/// Validate a user-entered medication name, returning the trimmed name
pub fn validate_medication_name(raw: &str) -> Result<String> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(DosewatchError::validation("medication name is required"));
    }

    if name.chars().count() < MIN_MEDICATION_NAME_LEN {
        return Err(DosewatchError::validation(format!(
            "medication name must be at least {} characters",
            MIN_MEDICATION_NAME_LEN
        )));
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_parses_upstream_json() {
        let json = r#"{
            "id": "10",
            "medicationId": "1",
            "time": "08:00",
            "frequency": "weekly",
            "selectedDays": [false, true, true, true, true, true, false],
            "checked": false
        }"#;

        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.frequency, Frequency::Weekly);
        assert_eq!(schedule.medication_id.as_str(), "1");
        assert!(schedule.selected_days.is_selected(1));
        assert!(!schedule.selected_days.is_selected(6));
        assert_eq!(schedule.day_of_month, None);
    }

    #[test]
    fn schedule_frequency_defaults_to_daily() {
        let json = r#"{ "id": "1", "medicationId": "1", "time": "12:00" }"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();

        assert_eq!(schedule.frequency, Frequency::Daily);
        assert!(!schedule.checked);
        assert_eq!(schedule.selected_days.to_array(), [false; 7]);
    }

    #[test]
    fn short_selected_days_pad_with_false() {
        let days = SelectedDays::new(vec![true, true]);
        assert_eq!(days.to_array(), [true, true, false, false, false, false, false]);
        assert!(!days.is_selected(6));
        assert!(!days.is_selected(100));
    }

    #[test]
    fn medication_kind_accepts_upstream_aliases() {
        let kinds: Vec<MedicationKind> =
            serde_json::from_str(r#"["injecao", "pilula", "xarope", "gotejamento", "comprimido", "spray"]"#)
                .unwrap();

        assert_eq!(
            kinds,
            vec![
                MedicationKind::Injection,
                MedicationKind::Pill,
                MedicationKind::Syrup,
                MedicationKind::Drip,
                MedicationKind::Tablet,
                MedicationKind::Spray,
            ]
        );

        let json = serde_json::to_string(&MedicationKind::Syrup).unwrap();
        assert_eq!(json, "\"syrup\"");
    }

    #[test]
    fn new_medication_gets_default_schedule() {
        let med = Medication::new("  Dipirona ", MedicationKind::Drip).unwrap();
        assert_eq!(med.name, "Dipirona");

        let schedule = med.schedule.unwrap();
        assert_eq!(schedule.medication_id, med.id);
        assert_eq!(schedule.time, "08:00");
        assert_eq!(schedule.frequency, Frequency::Daily);
        assert_eq!(schedule.selected_days.to_array(), [true; 7]);
        assert_eq!(schedule.day_of_month, Some(1));
        assert!(!schedule.checked);
    }

    #[test]
    fn medication_name_validation() {
        assert!(validate_medication_name("").is_err());
        assert!(validate_medication_name("   ").is_err());
        assert!(validate_medication_name(" A ").is_err());
        assert_eq!(validate_medication_name(" Xarope ").unwrap(), "Xarope");
    }

    #[test]
    fn malformed_time_has_no_wall_clock() {
        let mut schedule = Schedule::new(MedicationId::new("1"));
        assert_eq!(schedule.wall_clock(), WallClock::new(8, 0));

        schedule.time = "later".into();
        assert_eq!(schedule.wall_clock(), None);
    }
}
