//! JSON seed data
//!
//! The seed directory holds two optional files:
//! - `medications.json`: array of medications, each optionally embedding its schedule
//! - `schedules.json`: array of schedules
//!
//! A missing file is treated as an empty array.

use dosewatch_api::{Medication, Schedule};
use std::path::Path;
use tracing::{debug, info};

use crate::StoreResult;

/// Medications seed filename
pub const MEDICATIONS_FILE: &str = "medications.json";

/// Schedules seed filename
pub const SCHEDULES_FILE: &str = "schedules.json";

/// Parsed seed data
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub medications: Vec<Medication>,
    pub schedules: Vec<Schedule>,
}

impl Seed {
    /// Parse seed data from JSON array strings
    pub fn from_json(medications_json: &str, schedules_json: &str) -> StoreResult<Self> {
        Ok(Self {
            medications: serde_json::from_str(medications_json)?,
            schedules: serde_json::from_str(schedules_json)?,
        })
    }

    /// Load seed data from a directory
    pub fn load_dir(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();

        let medications: Vec<Medication> = read_array(&dir.join(MEDICATIONS_FILE))?;
        let schedules: Vec<Schedule> = read_array(&dir.join(SCHEDULES_FILE))?;

        info!(
            seed_dir = %dir.display(),
            medications = medications.len(),
            schedules = schedules.len(),
            "Seed data loaded"
        );

        Ok(Self {
            medications,
            schedules,
        })
    }
}

fn read_array<T: serde::de::DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    if !path.exists() {
        debug!(path = %path.display(), "Seed file absent, using empty set");
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosewatch_api::{Frequency, MedicationKind};
    use std::fs;

    const MEDICATIONS: &str = r#"[
        {
            "id": "1",
            "name": "Xarope",
            "type": "xarope",
            "schedule": {
                "id": "s1",
                "medicationId": "1",
                "time": "08:00",
                "frequency": "daily",
                "selectedDays": [true, true, true, true, true, true, true],
                "checked": false
            }
        },
        { "id": "2", "name": "Dipirona", "type": "gotejamento" }
    ]"#;

    const SCHEDULES: &str = r#"[
        {
            "id": "s2",
            "medicationId": "2",
            "time": "21:30",
            "frequency": "monthly",
            "selectedDays": [false, false, false, false, false, false, false],
            "dayOfMonth": 31,
            "checked": true
        }
    ]"#;

    #[test]
    fn parse_seed_json() {
        let seed = Seed::from_json(MEDICATIONS, SCHEDULES).unwrap();

        assert_eq!(seed.medications.len(), 2);
        assert_eq!(seed.medications[0].kind, MedicationKind::Syrup);
        assert!(seed.medications[0].schedule.is_some());
        assert!(seed.medications[1].schedule.is_none());

        assert_eq!(seed.schedules.len(), 1);
        assert_eq!(seed.schedules[0].frequency, Frequency::Monthly);
        assert_eq!(seed.schedules[0].day_of_month, Some(31));
        assert!(seed.schedules[0].checked);
    }

    #[test]
    fn load_seed_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MEDICATIONS_FILE), MEDICATIONS).unwrap();
        fs::write(dir.path().join(SCHEDULES_FILE), SCHEDULES).unwrap();

        let seed = Seed::load_dir(dir.path()).unwrap();
        assert_eq!(seed.medications.len(), 2);
        assert_eq!(seed.schedules.len(), 1);
    }

    #[test]
    fn missing_seed_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let seed = Seed::load_dir(dir.path()).unwrap();

        assert!(seed.medications.is_empty());
        assert!(seed.schedules.is_empty());
    }

    #[test]
    fn malformed_seed_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SCHEDULES_FILE), "{ not json").unwrap();

        assert!(Seed::load_dir(dir.path()).is_err());
    }
}
