//! Tide prediction.
//!
//! This crate provides:
//! - The 31-constituent table with speeds and equilibrium arguments
//! - Yearly astronomical arguments `V0 + u` and node factors `f`
//! - The [`WaterLevelCalculator`] capability with a harmonic model and a
//!   two-point rule-of-twelfths model
//! - High/low water search over a time window
//! - Spring/neap classification and lunitidal intervals from the Moon, and
//!   a transit-paced water-level model built on those intervals
//!
//! Heights are in whatever unit the station's amplitudes use.

pub mod astronomical;
pub mod constituent;
pub mod error;
pub mod extrema;
pub mod harmonic;
pub mod lunitidal;
pub mod lunitidal_level;
pub mod tide_types;
pub mod twelfths;

pub use astronomical::AstronomicalArguments;
pub use constituent::{ALL_CONSTITUENTS, TideConstituent};
pub use error::TideError;
pub use extrema::{EXTREMA_STEP_MINUTES, tides_between};
pub use harmonic::{HarmonicWaterLevelCalculator, WaterLevelCalculator};
pub use lunitidal::{lunitidal_interval, mean_lunitidal_interval, tidal_range};
pub use lunitidal_level::LunitidalWaterLevelCalculator;
pub use tide_types::{TidalHarmonic, TidalRange, Tide};
pub use twelfths::RuleOfTwelfthsWaterLevelCalculator;
