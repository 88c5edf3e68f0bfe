//! Data layer for dosewatch
//!
//! Provides:
//! - The `Store` trait consumed by the reminder engine
//! - An in-memory implementation
//! - Loading of the JSON seed files

mod memory;
mod seed;
mod traits;

pub use memory::*;
pub use seed::*;
pub use traits::*;

use dosewatch_util::DosewatchError;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DosewatchError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
