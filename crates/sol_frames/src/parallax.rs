//! Diurnal parallax in right ascension and declination.
//!
//! Shifts a geocentric position to the topocentric one seen by an
//! observer on the reference ellipsoid (height 0). Only the Moon is close
//! enough for the shift to matter (up to ~1°).
//!
//! Source: Meeus, *Astronomical Algorithms*, Eqs. 11.1 and 40.6–40.7.

use sol_time::{cos_deg, sin_deg, tan_deg};

use crate::coords::EquatorialCoordinate;

/// Earth equatorial radius in km used for the horizontal parallax.
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.14;

/// Polar-to-equatorial axis ratio b/a of the reference ellipsoid.
const AXIS_RATIO: f64 = 0.996_647_19;

/// Topocentric equatorial position of a body at `distance_km`.
///
/// `local_sidereal_hours` and `latitude_deg` describe the observer. The
/// returned coordinate keeps the input's `apparent` flag.
pub fn apply_parallax(
    equatorial: &EquatorialCoordinate,
    distance_km: f64,
    local_sidereal_hours: f64,
    latitude_deg: f64,
) -> EquatorialCoordinate {
    if !(distance_km.is_finite() && distance_km > EARTH_EQUATORIAL_RADIUS_KM) {
        return *equatorial;
    }

    let sin_pi = EARTH_EQUATORIAL_RADIUS_KM / distance_km;
    let h = equatorial.hour_angle_hours(local_sidereal_hours) * 15.0;
    let dec = equatorial.declination_deg;

    let u = (AXIS_RATIO * tan_deg(latitude_deg)).atan();
    let rho_cos = u.cos();
    let rho_sin = AXIS_RATIO * u.sin();

    let denominator = cos_deg(dec) - rho_cos * sin_pi * cos_deg(h);
    let delta_ra = (-rho_cos * sin_pi * sin_deg(h)).atan2(denominator).to_degrees();
    let topo_dec = ((sin_deg(dec) - rho_sin * sin_pi) * cos_deg(delta_ra))
        .atan2(denominator)
        .to_degrees();

    EquatorialCoordinate::new(
        topo_dec,
        equatorial.right_ascension_deg + delta_ra,
        equatorial.apparent,
    )
}
