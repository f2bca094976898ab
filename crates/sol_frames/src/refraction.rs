//! Atmospheric refraction for a standard atmosphere.
//!
//! Piecewise model: Sæmundsson-style tangent series above 5°, the
//! polynomial fit near the horizon, and a cotangent tail below it.
//!
//! Source: Explanatory Supplement to the Astronomical Almanac (1992), §3.283,
//! as used by common low-precision almanac code.

use sol_time::{polynomial, tan_deg};

use crate::coords::HorizonCoordinate;

/// Refraction correction in degrees for a geometric altitude in degrees.
///
/// Always non-negative; decays toward zero far below the horizon.
pub fn refraction_deg(altitude_deg: f64) -> f64 {
    if altitude_deg > 85.0 {
        return 0.0;
    }

    let tan_alt = tan_deg(altitude_deg);

    if altitude_deg > 5.0 {
        return (58.1 / tan_alt - 0.07 / tan_alt.powi(3) + 0.000_086 / tan_alt.powi(5)) / 3600.0;
    }

    if altitude_deg > -0.575 {
        return polynomial(altitude_deg, &[1735.0, -518.2, 103.4, -12.79, 0.711]) / 3600.0;
    }

    -20.774 / tan_alt / 3600.0
}

/// Lift a geometric horizon position by atmospheric refraction.
pub fn apply_refraction(horizon: &HorizonCoordinate) -> HorizonCoordinate {
    HorizonCoordinate::new(
        horizon.azimuth_deg,
        horizon.altitude_deg + refraction_deg(horizon.altitude_deg),
    )
}
