//! Error type shared by every search in this crate.

use sol_time::TimeError;
use thiserror::Error;

/// Errors from event searches.
///
/// Absence of an event (no sunrise, no eclipse within the bound) is never
/// an error; searches report it as `None`.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// A configuration field is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Observer location is out of range.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// A civil date or instant could not be converted.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}
