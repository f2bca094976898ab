//! Time utilities for low-precision astronomy.
//!
//! This crate provides:
//! - Polynomial evaluation and degree-based angle helpers
//! - Julian Day ↔ calendar conversions and Julian centuries
//! - A `UniversalTime` instant bridged to `chrono`
//! - ΔT (TT − UT) approximation
//! - Mean, apparent and local sidereal time

pub mod delta_t;
pub mod error;
pub mod julian;
pub mod math;
pub mod sidereal;
pub mod universal;

pub use delta_t::{delta_t_days, delta_t_seconds};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, centuries_to_jd, jd_to_calendar,
    jd_to_centuries,
};
pub use math::{
    cos_deg, deg_to_hours, delta_angle, frac, hours_to_deg, normalize_360, normalize_to_pm180,
    polynomial, sin_deg, tan_deg, wrap,
};
pub use sidereal::{
    apparent_sidereal_time_hours, local_sidereal_time_hours, mean_sidereal_time_hours,
};
pub use universal::{UniversalTime, parse_utc_offset};
