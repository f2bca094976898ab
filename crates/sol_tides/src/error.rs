//! Error type for tide model construction and tide searches.

use sol_search::SearchError;
use sol_time::TimeError;
use thiserror::Error;

use crate::constituent::TideConstituent;

/// Errors from building a water-level model or deriving tide statistics.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TideError {
    /// Amplitude is negative, NaN or infinite.
    #[error("{constituent} amplitude {amplitude} must be finite and non-negative")]
    InvalidAmplitude {
        constituent: TideConstituent,
        amplitude: f64,
    },
    /// Phase is NaN or infinite.
    #[error("{constituent} phase {phase} must be finite")]
    InvalidPhase {
        constituent: TideConstituent,
        phase: f64,
    },
    /// The same constituent appears twice in a harmonic table.
    #[error("constituent {0} is listed more than once")]
    DuplicateConstituent(TideConstituent),
    /// Two-point model given tides at the same instant.
    #[error("reference tides must be at different times")]
    EqualTimestamps,
    /// Two-point model given a reference height that is not finite.
    #[error("reference tide height {0} must be finite")]
    InvalidHeight(f64),
    /// Lunitidal interval is negative, not finite or a day or longer.
    #[error("lunitidal interval {0} h must be finite and within [0, 24)")]
    InvalidInterval(f64),
    /// A civil date or instant could not be converted.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    /// Moon transit search failed.
    #[error("moon transit search failed: {0}")]
    Search(#[from] SearchError),
}
