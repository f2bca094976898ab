//! Error types for calendar and civil-time conversions.

use thiserror::Error;

/// Errors from building or rendering a [`crate::UniversalTime`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Calendar fields do not name a real date.
    #[error("invalid calendar date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    /// Time of day outside [0, 24) hours.
    #[error("time of day {0} h is outside [0, 24)")]
    InvalidTimeOfDay(f64),
    /// Julian Day cannot be represented as a civil timestamp.
    #[error("Julian Day {0} is outside the representable civil range")]
    OutOfRange(f64),
    /// UTC offset string could not be parsed.
    #[error("invalid UTC offset '{0}', expected Z or ±HH:MM")]
    InvalidOffset(String),
}
