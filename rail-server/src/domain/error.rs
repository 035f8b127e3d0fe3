//! Domain error types.
//!
//! These errors represent validation failures when building domain values
//! from catalog data. They are distinct from I/O and HTTP errors.

use super::{InvalidStationCode, TimeError};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A station code failed validation
    #[error(transparent)]
    InvalidStation(#[from] InvalidStationCode),

    /// A time string failed validation
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    /// A line code is empty or malformed
    #[error("invalid line code: {0:?}")]
    InvalidLineCode(String),

    /// A line violates its structural invariants
    #[error("invalid line {code}: {reason}")]
    InvalidLine { code: String, reason: &'static str },

    /// A scheduled run has no stops
    #[error("schedule {0} has no stops")]
    EmptySchedule(u64),
}
