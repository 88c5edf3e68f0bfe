//! Error types for dosewatch

use thiserror::Error;

use crate::ScheduleId;

/// Domain error type for dosewatch operations
#[derive(Debug, Error)]
pub enum DosewatchError {
    #[error("Schedule not found: {0}")]
    ScheduleNotFound(ScheduleId),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl DosewatchError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DosewatchError>;
