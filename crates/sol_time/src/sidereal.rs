//! Greenwich and local sidereal time.
//!
//! Relates equatorial right ascension to an observer's hour angle.
//! All results are in hours on [0, 24).
//!
//! Sources:
//! - Mean sidereal time: Meeus, *Astronomical Algorithms*, Eq. 12.4.
//! - Equation of the equinoxes: Meeus, Ch. 12 (Δψ·cos ε).

use crate::julian::J2000_JD;
use crate::math::{cos_deg, deg_to_hours, wrap};
use crate::universal::UniversalTime;

/// Greenwich mean sidereal time in hours.
///
/// θ₀ = 280.46061837° + 360.98564736629°·(JD − 2451545)
///      + 0.000387933°·T² − T³/38710000
pub fn mean_sidereal_time_hours(ut: UniversalTime) -> f64 {
    let t = ut.julian_centuries();
    let deg = 280.460_618_37 + 360.985_647_366_29 * (ut.jd() - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    wrap(deg_to_hours(deg), 0.0, 24.0)
}

/// Greenwich apparent sidereal time in hours.
///
/// Adds the equation of the equinoxes, `Δψ·cos ε`, to the mean value.
/// `nutation_in_longitude_deg` is Δψ and `true_obliquity_deg` is ε.
pub fn apparent_sidereal_time_hours(
    ut: UniversalTime,
    nutation_in_longitude_deg: f64,
    true_obliquity_deg: f64,
) -> f64 {
    let correction = nutation_in_longitude_deg * cos_deg(true_obliquity_deg);
    wrap(mean_sidereal_time_hours(ut) + deg_to_hours(correction), 0.0, 24.0)
}

/// Local sidereal time from Greenwich sidereal time and east longitude.
pub fn local_sidereal_time_hours(greenwich_hours: f64, longitude_deg: f64) -> f64 {
    wrap(greenwich_hours + deg_to_hours(longitude_deg), 0.0, 24.0)
}
