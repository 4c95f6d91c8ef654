//! Engine error handling
//!
//! The engine leans on two fail-open contracts instead of surfacing most
//! failures: persistence reads fall back to fresh state and persistence
//! writes are logged and swallowed. The errors here cover what remains,
//! the cases a caller can actually act on.

use thiserror::Error;

/// Engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Recognition service error: {0}")]
    Recognition(#[from] reqwest::Error),
}

/// Streak precondition violation
///
/// The streak engine only moves forward in time. An activity date earlier
/// than the last active date means the caller replayed or backdated input;
/// the streak state must not silently absorb it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StreakError {
    #[error("activity date {date} precedes last active date {last_active}")]
    NonMonotonicDate {
        date: chrono::NaiveDate,
        last_active: chrono::NaiveDate,
    },
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
