//! ΔT = TT − UT, the drift of Earth-rotation time against uniform time.
//!
//! A single coarse polynomial is used for every year. Error is tens of
//! seconds for modern dates, which is below the accuracy of the
//! low-precision series that consume it.
//!
//! Source: Espenak & Meeus polynomial for 2050–2150, with its
//! `0.37·(year − 2100)` linear term, applied over the whole range.

use crate::math::polynomial;

/// ΔT in seconds for a calendar year.
pub fn delta_t_seconds(year: i32) -> f64 {
    let t = (year as f64 - 2000.0) / 100.0;
    polynomial(t, &[102.0, 102.0, 25.3]) + 0.37 * (year as f64 - 2100.0)
}

/// ΔT in days for a calendar year.
pub fn delta_t_days(year: i32) -> f64 {
    delta_t_seconds(year) / crate::julian::SECONDS_PER_DAY
}
